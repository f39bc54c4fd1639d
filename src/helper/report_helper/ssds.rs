use getset::Getters;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::helper::histogram::Histogram;
use crate::helper::report_helper::ReportError;

const TOTINFO_PREFIX: &str = "totinfo";
const SPOT_SUFFIX: &str = "_SPoT";

/// SPoT fractions below this are recorded as a literal zero instead of a
/// percentage, both as a sentinel and as the displayed value.
pub const SPOT_ZERO_FLOOR: f64 = 0.0005;

/// Scalar summary field aliased onto `filtered_fragments` whenever that
/// field appears in a details report.
pub const OTHER_FIELD_ALIAS: &str = "filtered_fragments";

/// Parsed SSDS details report for one file: `totinfo` scalar summary
/// fields plus one length histogram per fragment-property type
/// (composite labels such as `ssDNA_ITR`).
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct SsdsDetails {
    #[getset(get = "pub")]
    stats: IndexMap<String, f64>,
    #[getset(get = "pub")]
    histograms: IndexMap<String, Histogram>,
}

/// Parsed SSDS SPoT report for one file: read descriptor -> interval ->
/// percentage. `last_descriptor` records which descriptor the file ended
/// on; the per-file summary downstream keeps only that one (a quirk of
/// the upstream format consumers rely on).
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct SpotReport {
    #[getset(get = "pub")]
    values: IndexMap<String, IndexMap<String, f64>>,
    #[getset(get = "pub")]
    last_descriptor: Option<String>,
}

fn split_columns<'a>(
    file_name: &str,
    line: &'a str,
    expected: usize,
) -> Result<Vec<&'a str>, ReportError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < expected {
        return Err(ReportError::FieldCount {
            file: file_name.to_string(),
            expected,
            found: fields.len(),
            line: line.to_string(),
        });
    }
    Ok(fields)
}

fn parse_number<T: std::str::FromStr>(
    file_name: &str,
    line: &str,
    value: &str,
) -> Result<T, ReportError> {
    value.trim().parse().map_err(|_| ReportError::BadNumber {
        file: file_name.to_string(),
        value: value.to_string(),
        line: line.to_string(),
    })
}

/// Parses an SSDS details report.
///
/// Lines starting with `totinfo` are scalar summary fields
/// (`totinfo<TAB><label with spaces><TAB><float>`); everything else is a
/// histogram row (`<property-type><TAB><bin>\t<count>`). Unlike the
/// fragment-length parser, no minimum-support filter is applied.
pub fn parse_ssds_details(file_name: &str, content: &str) -> Result<SsdsDetails, ReportError> {
    let mut details = SsdsDetails::default();

    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        let fields = split_columns(file_name, line, 3)?;

        if !line.starts_with(TOTINFO_PREFIX) {
            let prop_type = fields[0].to_string();
            let bin: i64 = parse_number(file_name, line, fields[1])?;
            let count: u64 = parse_number(file_name, line, fields[2])?;
            details
                .histograms
                .entry(prop_type)
                .or_default()
                .insert(bin, count);
            continue;
        }

        let field = fields[1].trim().replace(' ', "_");
        let value: f64 = parse_number(file_name, line, fields[2])?;
        details.stats.insert(field.clone(), value);
        if field == OTHER_FIELD_ALIAS {
            details.stats.insert("other".to_string(), value);
        }
    }

    Ok(details)
}

/// Parses an SSDS SPoT report. Only lines whose first field ends in
/// `_SPoT` carry data; anything else is passed over silently.
pub fn parse_ssds_spot(file_name: &str, content: &str) -> Result<SpotReport, ReportError> {
    let mut report = SpotReport::default();

    for line in content.lines() {
        let first = line.split('\t').next().unwrap_or("");
        let Some(read_dets) = first.strip_suffix(SPOT_SUFFIX) else {
            continue;
        };
        let fields = split_columns(file_name, line, 3)?;
        let interval = fields[1].to_string();
        let fraction: f64 = parse_number(file_name, line, fields[2])?;
        let percentage = if fraction < SPOT_ZERO_FLOOR {
            0.0
        } else {
            fraction * 100.0
        };

        report
            .values
            .entry(read_dets.to_string())
            .or_default()
            .insert(interval, percentage);
        report.last_descriptor = Some(read_dets.to_string());
    }

    Ok(report)
}
