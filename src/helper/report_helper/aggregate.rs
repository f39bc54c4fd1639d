use std::collections::BTreeMap;

use getset::Getters;
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::helper::histogram::{Histogram, PercentHistogram, percent_normalized};
use crate::helper::report_helper::allelic_status::StatBlock;
use crate::helper::report_helper::run_report::RunWarning;
use crate::helper::report_helper::spot_matrix::{DNA_TYPES, SpotHeatmap, SpotMap, build_spot_heatmap};
use crate::helper::report_helper::ssds::{SpotReport, SsdsDetails};

/// Fragment properties reported per dna_type in SSDS details reports.
pub const FRAGMENT_PROPERTIES: [&str; 4] = ["Fragment", "ITR", "uH", "FillIn"];

/// Raised when, after sample filtering, a run holds no usable report at
/// all. Distinct from per-file parse failures, which only drop that
/// file's contribution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no usable reports found after sample filtering")]
pub struct EmptyRunError;

/// Count and percentage histograms per property, keyed by sample.
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct PropertyHistograms {
    #[getset(get = "pub")]
    counts: IndexMap<String, IndexMap<String, Histogram>>,
    #[getset(get = "pub")]
    percents: IndexMap<String, IndexMap<String, PercentHistogram>>,
}

/// Everything a run hands to the rendering collaborator.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct RunData {
    #[getset(get = "pub")]
    fragment_by_sample: IndexMap<String, BTreeMap<String, Histogram>>,
    #[getset(get = "pub")]
    merged_fragment_read_groups: IndexMap<String, Histogram>,
    #[getset(get = "pub")]
    allelic_by_sample: IndexMap<String, StatBlock>,
    #[getset(get = "pub")]
    ssds_stats_by_sample: IndexMap<String, IndexMap<String, f64>>,
    #[getset(get = "pub")]
    fragment_properties: IndexMap<String, PropertyHistograms>,
    #[getset(get = "pub")]
    spot_heatmap: SpotHeatmap,
    #[getset(get = "pub")]
    spot_stats_by_sample: IndexMap<String, IndexMap<String, f64>>,
}

/// Accumulates per-file aggregates across a run. Owns every per-run
/// collection; callers only go through the `add_*` methods and
/// [`RunAggregator::finish`].
#[derive(Debug, Default)]
pub struct RunAggregator {
    fragment_by_sample: IndexMap<String, BTreeMap<String, Histogram>>,
    allelic_by_sample: IndexMap<String, StatBlock>,
    ssds_stats_by_sample: IndexMap<String, IndexMap<String, f64>>,
    ssds_histograms: IndexMap<String, IndexMap<String, Histogram>>,
    spot_values: SpotMap,
    spot_stats_by_sample: IndexMap<String, IndexMap<String, f64>>,
    warnings: Vec<RunWarning>,
}

impl RunAggregator {
    pub fn new() -> Self {
        RunAggregator::default()
    }

    pub fn warnings(&self) -> &[RunWarning] {
        &self.warnings
    }

    fn warn_duplicate_sample(&mut self, sample: &str) {
        warn!("duplicate sample name found, overwriting: {}", sample);
        self.warnings
            .push(RunWarning::DuplicateSample(sample.to_string()));
    }

    pub fn add_fragment_report(&mut self, sample: &str, data_by_rg: BTreeMap<String, Histogram>) {
        if self.fragment_by_sample.contains_key(sample) {
            self.warn_duplicate_sample(sample);
        }
        for rg in data_by_rg.keys() {
            let claimed = self
                .fragment_by_sample
                .iter()
                .any(|(owner, by_rg)| owner != sample && by_rg.contains_key(rg));
            if claimed {
                warn!("duplicate read group {} found for {}", rg, sample);
                self.warnings
                    .push(RunWarning::DuplicateReadGroup(rg.clone(), sample.to_string()));
            }
        }
        self.fragment_by_sample
            .entry(sample.to_string())
            .or_default()
            .extend(data_by_rg);
    }

    pub fn add_allelic_report(&mut self, sample: &str, block: StatBlock) {
        if self.allelic_by_sample.insert(sample.to_string(), block).is_some() {
            self.warn_duplicate_sample(sample);
        }
    }

    pub fn add_ssds_details(&mut self, sample: &str, details: SsdsDetails) {
        if self
            .ssds_stats_by_sample
            .insert(sample.to_string(), details.stats().clone())
            .is_some()
        {
            self.warn_duplicate_sample(sample);
        }
        for (prop_type, hist) in details.histograms() {
            self.ssds_histograms
                .entry(prop_type.clone())
                .or_default()
                .insert(sample.to_string(), hist.clone());
        }
    }

    pub fn add_spot_report(&mut self, sample: &str, report: SpotReport) {
        for (read_dets, intervals) in report.values() {
            self.spot_values
                .entry(read_dets.clone())
                .or_default()
                .entry(sample.to_string())
                .or_default()
                .extend(intervals.iter().map(|(k, &v)| (k.clone(), v)));
        }
        // Per-file summary keeps only the file's last read descriptor;
        // the sparse map above keeps every descriptor.
        if let Some(last) = report.last_descriptor() {
            let summary = report.values().get(last).cloned().unwrap_or_default();
            if self
                .spot_stats_by_sample
                .insert(sample.to_string(), summary)
                .is_some()
            {
                self.warn_duplicate_sample(sample);
            }
        }
    }

    /// Drops ignored samples from every per-run collection before merging.
    pub fn apply_ignore_list(&mut self, ignored: &[String]) {
        if ignored.is_empty() {
            return;
        }
        let keep = |sample: &str| !ignored.iter().any(|ignored| ignored == sample);
        self.fragment_by_sample.retain(|sample, _| keep(sample));
        self.allelic_by_sample.retain(|sample, _| keep(sample));
        self.ssds_stats_by_sample.retain(|sample, _| keep(sample));
        self.spot_stats_by_sample.retain(|sample, _| keep(sample));
        for by_sample in self.ssds_histograms.values_mut() {
            by_sample.retain(|sample, _| keep(sample));
        }
        self.ssds_histograms.retain(|_, by_sample| !by_sample.is_empty());
        for by_sample in self.spot_values.values_mut() {
            by_sample.retain(|sample, _| keep(sample));
        }
        self.spot_values.retain(|_, by_sample| !by_sample.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.fragment_by_sample.is_empty()
            && self.allelic_by_sample.is_empty()
            && self.ssds_stats_by_sample.is_empty()
            && self.ssds_histograms.is_empty()
            && self.spot_values.is_empty()
            && self.spot_stats_by_sample.is_empty()
    }

    /// Flattens per-sample read groups into one joint key space. A read
    /// group whose name is already claimed by an earlier sample is
    /// disambiguated as `"<rg> (<sample>)"`; both histograms stay
    /// retrievable.
    pub fn merged_fragment_read_groups(&self) -> IndexMap<String, Histogram> {
        let mut merged: IndexMap<String, Histogram> = IndexMap::new();
        for (sample, by_rg) in &self.fragment_by_sample {
            for (rg, hist) in by_rg {
                let key = if merged.contains_key(rg) {
                    format!("{} ({})", rg, sample)
                } else {
                    rg.clone()
                };
                merged.insert(key, hist.clone());
            }
        }
        merged
    }

    /// Count and percentage histograms for every fragment property of one
    /// dna_type. Properties with no parsed data come back as empty maps.
    pub fn property_histograms(&self, dna_type: &str) -> PropertyHistograms {
        let mut set = PropertyHistograms::default();
        for property in FRAGMENT_PROPERTIES {
            let combo = format!("{}_{}", dna_type, property);
            let counts = self
                .ssds_histograms
                .get(&combo)
                .cloned()
                .unwrap_or_default();
            let percents = counts
                .iter()
                .map(|(sample, hist)| (sample.clone(), percent_normalized(hist)))
                .collect();
            set.counts.insert(property.to_string(), counts);
            set.percents.insert(property.to_string(), percents);
        }
        set
    }

    /// Consumes the aggregator and produces the render-ready run data, or
    /// `EmptyRunError` when nothing usable survived filtering.
    pub fn finish(self) -> Result<(RunData, Vec<RunWarning>), EmptyRunError> {
        if self.is_empty() {
            return Err(EmptyRunError);
        }

        let merged_fragment_read_groups = self.merged_fragment_read_groups();
        let fragment_properties = DNA_TYPES
            .iter()
            .map(|&dna_type| (dna_type.to_string(), self.property_histograms(dna_type)))
            .collect();
        let spot_heatmap = build_spot_heatmap(&self.spot_values);

        let data = RunData {
            fragment_by_sample: self.fragment_by_sample,
            merged_fragment_read_groups,
            allelic_by_sample: self.allelic_by_sample,
            ssds_stats_by_sample: self.ssds_stats_by_sample,
            fragment_properties,
            spot_heatmap,
            spot_stats_by_sample: self.spot_stats_by_sample,
        };
        Ok((data, self.warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::report_helper::ssds::{parse_ssds_details, parse_ssds_spot};

    fn rg_data(rg: &str, bins: &[(i64, u64)]) -> BTreeMap<String, Histogram> {
        BTreeMap::from([(rg.to_string(), bins.iter().copied().collect())])
    }

    #[test]
    fn test_read_group_collision_is_suffixed() {
        let mut agg = RunAggregator::new();
        agg.add_fragment_report("S1", rg_data("rg1", &[(100, 10)]));
        agg.add_fragment_report("S2", rg_data("rg1", &[(200, 20)]));

        let merged = agg.merged_fragment_read_groups();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["rg1"].get(&100), Some(&10));
        assert_eq!(merged["rg1 (S2)"].get(&200), Some(&20));
    }

    #[test]
    fn test_non_colliding_read_groups_keep_their_names() {
        let mut agg = RunAggregator::new();
        agg.add_fragment_report("S1", rg_data("rg1", &[(100, 10)]));
        agg.add_fragment_report("S2", rg_data("rg2", &[(200, 20)]));

        let merged = agg.merged_fragment_read_groups();
        assert!(merged.contains_key("rg1"));
        assert!(merged.contains_key("rg2"));
    }

    #[test]
    fn test_remerging_same_data_is_a_noop() {
        let mut agg = RunAggregator::new();
        agg.add_fragment_report("S1", rg_data("rg1", &[(100, 10)]));
        let before = agg.merged_fragment_read_groups();

        agg.add_fragment_report("S1", rg_data("rg1", &[(100, 10)]));
        let after = agg.merged_fragment_read_groups();
        assert_eq!(before, after);
    }

    #[test]
    fn test_ignore_list_filters_every_collection() {
        let mut agg = RunAggregator::new();
        agg.add_fragment_report("S1", rg_data("rg1", &[(100, 10)]));
        agg.add_fragment_report("S2", rg_data("rg2", &[(200, 20)]));
        let details = parse_ssds_details("S1.ssds_details.txt", "ssDNA_ITR\t5\t120\n").unwrap();
        agg.add_ssds_details("S1", details);
        let spot = parse_ssds_spot("S1.ssds_spot.txt", "ssDNA_SPoT\thotspots\t0.2\n").unwrap();
        agg.add_spot_report("S1", spot);

        agg.apply_ignore_list(&["S1".to_string()]);
        assert!(!agg.fragment_by_sample.contains_key("S1"));
        assert!(agg.fragment_by_sample.contains_key("S2"));
        assert!(agg.ssds_histograms.is_empty());
        assert!(agg.spot_values.is_empty());
        assert!(agg.spot_stats_by_sample.is_empty());
    }

    #[test]
    fn test_empty_run_is_an_error_not_a_crash() {
        let mut agg = RunAggregator::new();
        agg.add_fragment_report("S1", rg_data("rg1", &[(100, 10)]));
        agg.apply_ignore_list(&["S1".to_string()]);
        assert!(matches!(agg.finish(), Err(EmptyRunError)));
    }

    #[test]
    fn test_spot_summary_keeps_last_descriptor_only() {
        let content = "ssDNA_SPoT\thotspots\t0.2\n\
                       dsDNA_hiconf_SPoT\thotspots\t0.1\n";
        let mut agg = RunAggregator::new();
        agg.add_spot_report("S1", parse_ssds_spot("S1.ssds_spot.txt", content).unwrap());

        // Sparse map retains both descriptors.
        assert_eq!(agg.spot_values.len(), 2);
        // The per-file summary only holds the last one.
        let summary = &agg.spot_stats_by_sample["S1"];
        assert_eq!(summary["hotspots"], 10.0);
    }

    #[test]
    fn test_property_histograms_for_missing_combo_are_empty() {
        let agg = RunAggregator::new();
        let set = agg.property_histograms("ssDNA");
        for property in FRAGMENT_PROPERTIES {
            assert!(set.counts()[property].is_empty());
            assert!(set.percents()[property].is_empty());
        }
    }

    #[test]
    fn test_finish_builds_percent_histograms() {
        let content = "ssDNA_Fragment\t10\t0\nssDNA_Fragment\t20\t5\nssDNA_Fragment\t30\t5\n";
        let mut agg = RunAggregator::new();
        agg.add_ssds_details(
            "S1",
            parse_ssds_details("S1.ssds_details.txt", content).unwrap(),
        );

        let (data, warnings) = agg.finish().unwrap();
        assert!(warnings.is_empty());
        let percents = &data.fragment_properties()["ssDNA"].percents()["Fragment"]["S1"];
        assert_eq!(percents.get(&10), Some(&0.0));
        assert_eq!(percents.get(&20), Some(&50.0));
        assert_eq!(percents.get(&30), Some(&50.0));
    }
}
