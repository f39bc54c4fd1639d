use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ReportError {
    #[error("{file}: malformed row, expected '<length>,<count>' or the literal column header: {line}")]
    MalformedRow { file: String, line: String },

    #[error("{file}: data row encountered before any '#Sample:' header: {line}")]
    RowBeforeHeader { file: String, line: String },

    #[error("{file}: expected {expected} tab-separated fields, found {found}: {line}")]
    FieldCount {
        file: String,
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("{file}: key '{key}' does not split into exactly two '/'-separated identifiers")]
    KeyShape { file: String, key: String },

    #[error("{file}: unknown section '{section}' in line: {line}")]
    UnknownSection {
        file: String,
        section: String,
        line: String,
    },

    #[error("{file}: unparsable number '{value}' in line: {line}")]
    BadNumber {
        file: String,
        value: String,
        line: String,
    },
}
