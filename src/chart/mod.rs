//! RTT chart generation.
//!
//! Renders average RTT by hop as an SVG line chart with one line per run,
//! plus a plain-text table for terminal output.

pub mod generator;

// Re-export main types
pub use generator::{generate_chart, generate_text_summary, ChartConfig};
