use std::error::Error;
use std::fmt::Display;

use chrono::{DateTime, Local};
use getset::{Getters, Setters};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::helper::report_helper::aggregate::RunData;
use crate::helper::report_helper::allelic_status::COMMON_CATEGORIES;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunWarning {
    DuplicateSample(String),
    DuplicateReadGroup(String, String),
    SkippedFile(String, String),
}

impl Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunWarning::DuplicateSample(sample) => {
                write!(f, "Duplicate sample name {}, earlier data overwritten", sample)
            }
            RunWarning::DuplicateReadGroup(rg, sample) => {
                write!(f, "Duplicate read group {} found for sample {}", rg, sample)
            }
            RunWarning::SkippedFile(file, reason) => {
                write!(f, "Skipped report {}: {}", file, reason)
            }
        }
    }
}

/// Run-level hand-off wrapper: timestamps, provenance and warnings around
/// the normalized [`RunData`] payload.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, Setters)]
pub struct RunReport {
    #[getset(get = "pub", set = "pub")]
    process_start_time: DateTime<Local>,
    #[getset(get = "pub", set = "pub")]
    process_end_time: DateTime<Local>,
    #[getset(get = "pub", set = "pub")]
    current_version: String,
    #[getset(get = "pub", set = "pub")]
    input_directory: String,
    #[getset(get = "pub", set = "pub")]
    warnings: Vec<RunWarning>,
    #[getset(get = "pub")]
    data: RunData,
}

impl RunReport {
    pub fn new(input_directory: String, data: RunData, warnings: Vec<RunWarning>) -> Self {
        RunReport {
            process_start_time: Local::now(),
            process_end_time: Local::now(),
            current_version: env!("CARGO_PKG_VERSION").to_string(),
            input_directory,
            warnings,
            data,
        }
    }

    /// SSDS scalar stats as CSV, one row per sample. Columns are the
    /// union of field names in first-seen order.
    pub fn ssds_stats_csv(&self) -> Result<String, Box<dyn Error>> {
        let stats = self.data.ssds_stats_by_sample();
        let mut fields: IndexSet<&str> = IndexSet::new();
        for per_sample in stats.values() {
            fields.extend(per_sample.keys().map(String::as_str));
        }

        let mut wtr = csv::Writer::from_writer(Vec::new());
        let mut header = vec!["sample"];
        header.extend(fields.iter().copied());
        wtr.write_record(&header)?;
        for (sample, per_sample) in stats {
            let mut record = vec![sample.clone()];
            for field in &fields {
                record.push(
                    per_sample
                        .get(*field)
                        .map(|value| value.to_string())
                        .unwrap_or_default(),
                );
            }
            wtr.write_record(&record)?;
        }
        Ok(String::from_utf8(wtr.into_inner()?)?)
    }

    /// One allelic-status section as CSV, common categories first, then
    /// any additional categories in first-seen order.
    pub fn allelic_section_csv(&self, section: &str) -> Result<String, Box<dyn Error>> {
        let blocks = self.data.allelic_by_sample();
        let mut categories: IndexSet<&str> = COMMON_CATEGORIES.iter().copied().collect();
        for block in blocks.values() {
            categories.extend(block.additional_categories(section));
        }

        let mut wtr = csv::Writer::from_writer(Vec::new());
        let mut header = vec!["sample"];
        header.extend(categories.iter().copied());
        wtr.write_record(&header)?;
        for (sample, block) in blocks {
            let mut record = vec![sample.clone()];
            for category in &categories {
                let count = block
                    .section(section)
                    .and_then(|counts| counts.get(*category))
                    .copied()
                    .unwrap_or(0);
                record.push(count.to_string());
            }
            wtr.write_record(&record)?;
        }
        Ok(String::from_utf8(wtr.into_inner()?)?)
    }
}
