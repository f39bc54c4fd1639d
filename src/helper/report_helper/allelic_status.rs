use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::helper::report_helper::ReportError;

const SEP: char = '\t';
const KEY_SEP: char = '/';

/// Sections an allelic-status report is divided into.
pub const ALLELIC_SECTIONS: [&str; 2] = ["allelic_status", "allelic_pairs"];

/// Categories every section carries, in display order. Absent categories
/// stay at zero rather than being missing.
pub const COMMON_CATEGORIES: [&str; 6] = [
    "genome1",
    "genome2",
    "unassignedN",
    "unassigned_other",
    "conflicting",
    "other",
];

/// Per-file allelic-status counts: section -> category -> count.
///
/// Both sections are pre-seeded with the common categories at zero;
/// categories beyond that set are appended in the order the file
/// introduces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    sections: IndexMap<String, IndexMap<String, u64>>,
}

impl StatBlock {
    pub fn new() -> Self {
        let mut sections = IndexMap::new();
        for section in ALLELIC_SECTIONS {
            let mut categories = IndexMap::new();
            for category in COMMON_CATEGORIES {
                categories.insert(category.to_string(), 0);
            }
            sections.insert(section.to_string(), categories);
        }
        StatBlock { sections }
    }

    pub fn section(&self, name: &str) -> Option<&IndexMap<String, u64>> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> &IndexMap<String, IndexMap<String, u64>> {
        &self.sections
    }

    fn set(&mut self, section: &str, category: &str, count: u64) -> bool {
        match self.sections.get_mut(section) {
            Some(categories) => {
                categories.insert(category.to_string(), count);
                true
            }
            None => false,
        }
    }

    /// Categories seen in this file beyond the common set, per section,
    /// in the order the file introduced them.
    pub fn additional_categories(&self, section: &str) -> Vec<&str> {
        self.sections
            .get(section)
            .map(|categories| {
                categories
                    .keys()
                    .map(String::as_str)
                    .filter(|category| !COMMON_CATEGORIES.contains(category))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        StatBlock::new()
    }
}

/// Parses an allelic-status stats report of `section/category<TAB>count`
/// lines. Blank lines are skipped; anything else that does not match the
/// shape is a hard error naming the file and line. Re-encountering a
/// category overwrites the previous count.
pub fn parse_allelic_status(file_name: &str, content: &str) -> Result<StatBlock, ReportError> {
    let mut block = StatBlock::new();

    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(SEP).collect();
        if fields.len() != 2 {
            return Err(ReportError::FieldCount {
                file: file_name.to_string(),
                expected: 2,
                found: fields.len(),
                line: line.to_string(),
            });
        }
        let key_fields: Vec<&str> = fields[0].split(KEY_SEP).collect();
        if key_fields.len() != 2 {
            return Err(ReportError::KeyShape {
                file: file_name.to_string(),
                key: fields[0].to_string(),
            });
        }
        let count: u64 = fields[1].parse().map_err(|_| ReportError::BadNumber {
            file: file_name.to_string(),
            value: fields[1].to_string(),
            line: line.to_string(),
        })?;
        if !block.set(key_fields[0], key_fields[1], count) {
            return Err(ReportError::UnknownSection {
                file: file_name.to_string(),
                section: key_fields[0].to_string(),
                line: line.to_string(),
            });
        }
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_present_even_for_sparse_input() {
        let block = parse_allelic_status("s.allelic_status.txt", "allelic_status/genome1\t42\n")
            .unwrap();
        let section = block.section("allelic_status").unwrap();
        assert_eq!(section.len(), COMMON_CATEGORIES.len());
        assert_eq!(section["genome1"], 42);
        assert_eq!(section["genome2"], 0);
        assert_eq!(section["conflicting"], 0);
        // The untouched section is fully seeded too.
        let pairs = block.section("allelic_pairs").unwrap();
        assert!(pairs.values().all(|&count| count == 0));
    }

    #[test]
    fn test_missing_subkey_is_an_error() {
        let err = parse_allelic_status("s.allelic_status.txt", "genome1\t5\n").unwrap_err();
        assert!(matches!(err, ReportError::KeyShape { .. }));
    }

    #[test]
    fn test_wrong_field_count_is_an_error() {
        let err =
            parse_allelic_status("s.allelic_status.txt", "allelic_status/genome1\t5\t9\n")
                .unwrap_err();
        assert!(matches!(err, ReportError::FieldCount { found: 3, .. }));
    }

    #[test]
    fn test_unknown_section_is_an_error() {
        let err = parse_allelic_status("s.allelic_status.txt", "bogus/genome1\t5\n").unwrap_err();
        assert!(matches!(err, ReportError::UnknownSection { .. }));
    }

    #[test]
    fn test_last_write_wins() {
        let content = "allelic_status/genome1\t5\nallelic_status/genome1\t9\n";
        let block = parse_allelic_status("s.allelic_status.txt", content).unwrap();
        assert_eq!(block.section("allelic_status").unwrap()["genome1"], 9);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let content = "\nallelic_status/genome2\t3\n\n";
        let block = parse_allelic_status("s.allelic_status.txt", content).unwrap();
        assert_eq!(block.section("allelic_status").unwrap()["genome2"], 3);
    }

    #[test]
    fn test_additional_categories_keep_insertion_order() {
        let content = "allelic_status/weird_b\t1\nallelic_status/weird_a\t2\n";
        let block = parse_allelic_status("s.allelic_status.txt", content).unwrap();
        assert_eq!(
            block.additional_categories("allelic_status"),
            vec!["weird_b", "weird_a"]
        );
        assert!(block.additional_categories("allelic_pairs").is_empty());
    }
}
