//! Fixed display metadata handed to the rendering collaborator. These are
//! configuration constants, never computed or mutated at runtime.

/// Display key: data field, hex color, human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayKey {
    pub field: &'static str,
    pub color: &'static str,
    pub name: &'static str,
}

/// Allelic-status categories with their bar colors, in display order.
pub const ALLELIC_CATEGORY_COLORS: [(&str, &str); 6] = [
    ("genome1", "#33a02c"),
    ("genome2", "#6a3d9a"),
    ("unassignedN", "#ff7f00"),
    ("unassigned_other", "#fff900"),
    ("conflicting", "#e31a1c"),
    ("other", "#cccccc"),
];

/// Keys for the total-alignment bar plot (includes unaligned buckets).
pub const TOTAL_ALIGNMENT_KEYS: [DisplayKey; 7] = [
    DisplayKey { field: "ssDNA_fragments", color: "#437bb1", name: "ssDNA" },
    DisplayKey { field: "ssDNA_type2_fragments", color: "#f7a35c", name: "ssDNA (type 2)" },
    DisplayKey { field: "dsDNA_hiconf_fragments", color: "#11a400", name: "dsDNA (higher confidence)" },
    DisplayKey { field: "dsDNA_loconf_fragments", color: "#0b6c00", name: "dsDNA (lower confidence)" },
    DisplayKey { field: "unclassified_fragments", color: "#b1084c", name: "Unclassified" },
    DisplayKey { field: "adapter", color: "#7fffd4", name: "Adapter" },
    DisplayKey { field: "other", color: "#696969", name: "Other" },
];

/// Keys for the SSDS alignment bar plot (excluding unaligned).
pub const SSDS_ALIGNMENT_KEYS: [DisplayKey; 5] = [
    DisplayKey { field: "ssDNA_fragments", color: "#437bb1", name: "ssDNA" },
    DisplayKey { field: "ssDNA_type2_fragments", color: "#f7a35c", name: "ssDNA (type 2)" },
    DisplayKey { field: "dsDNA_hiconf_fragments", color: "#11a400", name: "dsDNA (higher confidence)" },
    DisplayKey { field: "dsDNA_loconf_fragments", color: "#0b6c00", name: "dsDNA (lower confidence)" },
    DisplayKey { field: "unclassified_fragments", color: "#b1084c", name: "Unclassified" },
];

/// Color stops for the SPoT heatmap: 0 / no data is white, then yellow
/// through orange to red with increasing SPoT.
pub const SPOT_HEATMAP_COLOR_STOPS: [(f64, &str); 4] = [
    (0.0, "#ffffff"),
    (0.001, "#fefce9"),
    (0.50, "#ffc265"),
    (1.00, "#ff6262"),
];

pub const SPOT_HEATMAP_Y_TITLE: &str = "Interval";
pub const FRAGMENT_LENGTH_X_LABEL: &str = "Fragment length (bp)";
pub const FRAGMENT_LENGTH_Y_LABEL: &str = "Number of reads";

/// Axis labels for the fragment-property histogram panels, in panel
/// order: (panel name, y label, x label).
pub const PROPERTY_PANEL_LABELS: [(&str, &str, &str); 8] = [
    ("ITR (Count)", "Fragments (#)", "Total ITR length (nt)"),
    ("ITR (%)", "Fragments (%)", "Total ITR length (nt)"),
    ("Micro-homology (Count)", "Fragments (#)", "ITR microhomology length (nt)"),
    ("Micro-homology (%)", "Fragments (%)", "ITR microhomology length (nt)"),
    ("Fill-in (Count)", "Fragments (#)", "ITR fill-in length (nt)"),
    ("Fill-in (%)", "Fragments (%)", "ITR fill-in length (nt)"),
    ("Fragment (Count)", "Fragments (#)", "Fragment length (nt)"),
    ("Fragment (%)", "Fragments (%)", "Fragment length (nt)"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::report_helper::allelic_status::COMMON_CATEGORIES;

    #[test]
    fn test_allelic_colors_cover_common_categories_in_order() {
        let colored: Vec<&str> = ALLELIC_CATEGORY_COLORS.iter().map(|&(c, _)| c).collect();
        assert_eq!(colored, COMMON_CATEGORIES);
    }
}
