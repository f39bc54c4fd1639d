use std::io;

use thiserror::Error;

use crate::helper::report_helper::{EmptyRunError, ReportError};

pub mod aggregate;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Report parse error: {0}")]
    Report(#[from] ReportError),

    #[error(transparent)]
    EmptyRun(#[from] EmptyRunError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Export(String),
}
