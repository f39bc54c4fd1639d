pub mod aggregate;
pub mod allelic_status;
pub mod display;
pub mod error;
pub mod fragment_length;
pub mod run_report;
pub mod spot_matrix;
pub mod ssds;

pub use aggregate::{EmptyRunError, PropertyHistograms, RunAggregator, RunData};
pub use allelic_status::{StatBlock, parse_allelic_status};
pub use error::ReportError;
pub use fragment_length::parse_fragment_length_hist;
pub use run_report::{RunReport, RunWarning};
pub use spot_matrix::{SpotHeatmap, SpotMap, build_spot_heatmap};
pub use ssds::{SpotReport, SsdsDetails, parse_ssds_details, parse_ssds_spot};
