//! Output writers for trace reports and charts.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports (pretty)
//! - SVG charts

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use svg::write_svg;
