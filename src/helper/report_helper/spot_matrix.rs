use std::collections::BTreeSet;

use getset::Getters;
use indexmap::IndexMap;
use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// Sparse SPoT store: dna_type -> sample -> interval -> percentage.
pub type SpotMap = IndexMap<String, IndexMap<String, IndexMap<String, f64>>>;

/// Fixed dna_type enumeration order for heatmap columns.
pub const DNA_TYPES: [&str; 5] = [
    "ssDNA",
    "ssDNA_type2",
    "dsDNA_hiconf",
    "dsDNA_loconf",
    "unclassified",
];

/// Short codes used in column labels, index-aligned with `DNA_TYPES`.
pub const SHORT_DNA_TYPES: [&str; 5] = ["ss", "t2", "dH", "dL", "un"];

/// The dna_type whose observations define the heatmap row set and the
/// sample roster.
pub const REFERENCE_DNA_TYPE: &str = "ssDNA";

/// Dense heatmap matrix for the rendering collaborator. Row and column
/// ordering is part of the contract: rows are the sorted union of
/// intervals observed under `REFERENCE_DNA_TYPE`, columns enumerate
/// `DNA_TYPES` order crossed with sorted sample names.
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct SpotHeatmap {
    #[getset(get = "pub")]
    rows: Vec<String>,
    #[getset(get = "pub")]
    columns: Vec<String>,
    #[getset(get = "pub")]
    values: Vec<Vec<f64>>,
}

pub fn column_label(dna_type_index: usize, sample: &str) -> String {
    format!("({}){}", SHORT_DNA_TYPES[dna_type_index], sample)
}

/// Builds the dense matrix from the sparse SPoT store. Cells without a
/// stored percentage default to 0. An absent reference dna_type yields an
/// empty heatmap.
pub fn build_spot_heatmap(spot: &SpotMap) -> SpotHeatmap {
    let Some(reference) = spot.get(REFERENCE_DNA_TYPE) else {
        return SpotHeatmap::default();
    };

    let mut samples: Vec<&String> = reference.keys().collect();
    samples.sort();

    let rows: Vec<String> = reference
        .values()
        .flat_map(|intervals| intervals.keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();

    let columns: Vec<String> = iproduct!(0..DNA_TYPES.len(), &samples)
        .map(|(idx, sample)| column_label(idx, sample.as_str()))
        .collect();

    let mut values = Vec::with_capacity(rows.len());
    for interval in &rows {
        let mut row = Vec::with_capacity(columns.len());
        for dna_type in DNA_TYPES {
            for sample in &samples {
                let cell = spot
                    .get(dna_type)
                    .and_then(|by_sample| by_sample.get(sample.as_str()))
                    .and_then(|intervals| intervals.get(interval))
                    .copied()
                    .unwrap_or(0.0);
                row.push(cell);
            }
        }
        values.push(row);
    }

    SpotHeatmap {
        rows,
        columns,
        values,
    }
}
