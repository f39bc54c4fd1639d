use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, warn};

use crate::helper::io::{
    ReportKind, find_report_files, read_report_text, sample_name_from_file_name,
};
use crate::helper::json::ToJsonString;
use crate::helper::report_helper::{
    ReportError, RunAggregator, RunReport, RunWarning, parse_allelic_status,
    parse_fragment_length_hist, parse_ssds_details, parse_ssds_spot,
};
use crate::pipelines::PipelineError;

/// Aggregates every recognized report under `input` into normalized
/// per-sample structures and writes the JSON summary plus CSV tables to
/// `output`. A file that fails to parse is skipped with a warning; a run
/// with no usable reports after filtering fails outright.
pub fn run_aggregate(
    input: &str,
    output: &str,
    ignore_samples: &[String],
) -> Result<RunReport, PipelineError> {
    let start_time = Local::now();
    let output_path = PathBuf::from(output);
    if output_path.is_file() {
        return Err(PipelineError::Io(std::io::Error::other(
            "Output path must be a directory",
        )));
    } else if !output_path.exists() {
        fs::create_dir_all(&output_path)?;
    }

    let mut aggregator = RunAggregator::new();
    let mut skipped: Vec<RunWarning> = Vec::new();
    let mut n_found = [0usize; 4];

    for path in find_report_files(Path::new(input))? {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(kind) = ReportKind::from_file_name(&file_name) else {
            debug!("not a recognized report, skipping: {}", file_name);
            continue;
        };
        let sample = sample_name_from_file_name(&file_name);
        let content = read_report_text(&path)?;

        match accumulate(&mut aggregator, kind, &sample, &file_name, &content) {
            Ok(()) => {
                n_found[kind as usize] += 1;
            }
            Err(err) => {
                warn!("{}", err);
                skipped.push(RunWarning::SkippedFile(file_name, err.to_string()));
            }
        }
    }

    info!("Found {} fragment-length reports", n_found[ReportKind::FragmentLength as usize]);
    info!("Found {} allelic-status reports", n_found[ReportKind::AllelicStatus as usize]);
    info!("Found {} SSDS details reports", n_found[ReportKind::SsdsDetails as usize]);
    info!("Found {} SSDS SPoT reports", n_found[ReportKind::SsdsSpot as usize]);

    aggregator.apply_ignore_list(ignore_samples);

    let (data, mut warnings) = aggregator.finish()?;
    warnings.extend(skipped);

    let mut report = RunReport::new(input.to_string(), data, warnings);
    report.set_process_start_time(start_time);
    report.set_process_end_time(Local::now());

    write_outputs(&report, &output_path)?;
    Ok(report)
}

fn accumulate(
    aggregator: &mut RunAggregator,
    kind: ReportKind,
    sample: &str,
    file_name: &str,
    content: &str,
) -> Result<(), ReportError> {
    match kind {
        ReportKind::FragmentLength => {
            let data_by_rg = parse_fragment_length_hist(file_name, content)?;
            aggregator.add_fragment_report(sample, data_by_rg);
        }
        ReportKind::AllelicStatus => {
            let block = parse_allelic_status(file_name, content)?;
            aggregator.add_allelic_report(sample, block);
        }
        ReportKind::SsdsDetails => {
            let details = parse_ssds_details(file_name, content)?;
            aggregator.add_ssds_details(sample, details);
        }
        ReportKind::SsdsSpot => {
            let spot = parse_ssds_spot(file_name, content)?;
            aggregator.add_spot_report(sample, spot);
        }
    }
    Ok(())
}

fn write_outputs(report: &RunReport, output_path: &Path) -> Result<(), PipelineError> {
    let summary_file = output_path.join("seqrep_summary.json");
    fs::write(&summary_file, report.to_json_string()?)?;
    info!("wrote {}", summary_file.display());

    if !report.data().ssds_stats_by_sample().is_empty() {
        let stats_csv = report
            .ssds_stats_csv()
            .map_err(|e| PipelineError::Export(e.to_string()))?;
        fs::write(output_path.join("ssds_stats.csv"), stats_csv)?;
    }

    if !report.data().allelic_by_sample().is_empty() {
        for section in crate::helper::report_helper::allelic_status::ALLELIC_SECTIONS {
            let section_csv = report
                .allelic_section_csv(section)
                .map_err(|e| PipelineError::Export(e.to_string()))?;
            fs::write(output_path.join(format!("{}.csv", section)), section_csv)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixtures(dir: &Path) {
        fs::write(
            dir.join("S1.fragment_length_hist.csv"),
            "#Sample: rg1\nFragmentLength,Count\n100,10\n101,4\n",
        )
        .unwrap();
        fs::write(
            dir.join("S1.allelic_status.txt"),
            "allelic_status/genome1\t42\nallelic_pairs/genome2\t7\n",
        )
        .unwrap();
        fs::write(
            dir.join("S1.ssds_details.txt"),
            "totinfo\tssDNA fragments\t1000\nssDNA_ITR\t5\t120\n",
        )
        .unwrap();
        fs::write(dir.join("S1.ssds_spot.txt"), "ssDNA_SPoT\thotspots\t0.01\n").unwrap();
        // Malformed allelic report for a second sample: skipped, not fatal.
        fs::write(dir.join("S2.allelic_status.txt"), "genome1\t5\n").unwrap();
    }

    #[test]
    fn test_run_aggregate_end_to_end() {
        let input = std::env::temp_dir().join("seqrep_test_in");
        let output = std::env::temp_dir().join("seqrep_test_out");
        let _ = fs::remove_dir_all(&input);
        let _ = fs::remove_dir_all(&output);
        fs::create_dir_all(&input).unwrap();
        write_fixtures(&input);

        let report = run_aggregate(
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            &["IGNORED".to_string()],
        )
        .unwrap();

        let data = report.data();
        assert_eq!(data.merged_fragment_read_groups()["rg1"].get(&100), Some(&10));
        assert_eq!(
            data.allelic_by_sample()["S1"].section("allelic_status").unwrap()["genome1"],
            42
        );
        assert_eq!(data.ssds_stats_by_sample()["S1"]["ssDNA_fragments"], 1000.0);
        assert_eq!(data.spot_heatmap().rows(), &["hotspots"]);
        assert_eq!(data.spot_heatmap().values()[0][0], 1.0);
        // S2's malformed file was skipped with a warning, not a failure.
        assert!(!data.allelic_by_sample().contains_key("S2"));
        assert!(report
            .warnings()
            .iter()
            .any(|w| matches!(w, RunWarning::SkippedFile(file, _) if file == "S2.allelic_status.txt")));

        assert!(output.join("seqrep_summary.json").exists());
        assert!(output.join("ssds_stats.csv").exists());
        assert!(output.join("allelic_status.csv").exists());
        assert!(output.join("allelic_pairs.csv").exists());
    }

    #[test]
    fn test_empty_run_is_a_hard_error() {
        let input = std::env::temp_dir().join("seqrep_test_empty_in");
        let output = std::env::temp_dir().join("seqrep_test_empty_out");
        let _ = fs::remove_dir_all(&input);
        let _ = fs::remove_dir_all(&output);
        fs::create_dir_all(&input).unwrap();

        let result = run_aggregate(input.to_str().unwrap(), output.to_str().unwrap(), &[]);
        assert!(matches!(result, Err(PipelineError::EmptyRun(_))));
    }
}
