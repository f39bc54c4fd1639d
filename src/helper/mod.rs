pub mod histogram;
pub mod io;
pub mod json;
pub mod report_helper;
