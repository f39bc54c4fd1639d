use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;

/// The report families this crate understands, recognized by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    FragmentLength,
    AllelicStatus,
    SsdsDetails,
    SsdsSpot,
}

const REPORT_SUFFIXES: [(&str, ReportKind); 4] = [
    (".fragment_length_hist.csv", ReportKind::FragmentLength),
    (".allelic_status.txt", ReportKind::AllelicStatus),
    (".ssds_details.txt", ReportKind::SsdsDetails),
    (".ssds_spot.txt", ReportKind::SsdsSpot),
];

impl ReportKind {
    /// Classifies a file by name. A trailing `.gz` is ignored.
    pub fn from_file_name(name: &str) -> Option<ReportKind> {
        let name = name.strip_suffix(".gz").unwrap_or(name);
        REPORT_SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|&(_, kind)| kind)
    }
}

static SAMPLE_NAME_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\..+$").unwrap());

/// Derives the nominal sample name from a report file name by chopping
/// everything from the first dot, e.g. `S1.fragment_length_hist.csv` -> `S1`.
pub fn sample_name_from_file_name(file_name: &str) -> String {
    SAMPLE_NAME_TAIL.replace(file_name, "").into_owned()
}

/// Reads the full text of a report file, transparently decompressing `.gz`.
pub fn read_report_text(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut stream: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let mut content = String::new();
    stream.read_to_string(&mut content)?;
    Ok(content)
}

/// Lists regular files directly under `input`, sorted by name so runs are
/// deterministic regardless of directory iteration order.
pub fn find_report_files(input: &Path) -> io::Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Input path '{}' does not exist", input.display()),
        ));
    }
    if !input.is_dir() {
        return Err(io::Error::other(format!(
            "Input path '{}' is not a directory",
            input.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
