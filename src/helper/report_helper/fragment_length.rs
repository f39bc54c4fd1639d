use std::collections::BTreeMap;

use crate::helper::histogram::{Histogram, MIN_CNT_TO_SHOW_ON_PLOT};
use crate::helper::report_helper::ReportError;

const SAMPLE_HEADER_PREFIX: &str = "#Sample: ";
const COLUMN_HEADER: &str = "FragmentLength,Count";

/// Parses a multi-section fragment-length histogram report.
///
/// Each section opens with `#Sample: <read-group>` and carries
/// `<length>,<count>` rows, with an optional literal
/// `FragmentLength,Count` header row. Bins with fewer than
/// `MIN_CNT_TO_SHOW_ON_PLOT` reads are dropped.
///
/// Returns one histogram per read group, scoped to this file.
pub fn parse_fragment_length_hist(
    file_name: &str,
    content: &str,
) -> Result<BTreeMap<String, Histogram>, ReportError> {
    let mut data_by_rg: BTreeMap<String, Histogram> = BTreeMap::new();
    let mut read_group: Option<&str> = None;

    for line in content.lines() {
        if let Some(name) = line.strip_prefix(SAMPLE_HEADER_PREFIX) {
            read_group = Some(name);
            continue;
        }

        let Some(rg) = read_group else {
            return Err(ReportError::RowBeforeHeader {
                file: file_name.to_string(),
                line: line.to_string(),
            });
        };

        let parsed = line
            .split_once(',')
            .and_then(|(frag_len, cnt)| {
                Some((frag_len.parse::<i64>().ok()?, cnt.parse::<u64>().ok()?))
            });

        match parsed {
            Some((frag_len, cnt)) => {
                if cnt >= MIN_CNT_TO_SHOW_ON_PLOT {
                    data_by_rg
                        .entry(rg.to_string())
                        .or_default()
                        .insert(frag_len, cnt);
                }
            }
            None => {
                // Only the repeated column header is tolerated here.
                if line != COLUMN_HEADER {
                    return Err(ReportError::MalformedRow {
                        file: file_name.to_string(),
                        line: line.to_string(),
                    });
                }
            }
        }
    }

    Ok(data_by_rg)
}
