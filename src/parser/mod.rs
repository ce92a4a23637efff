//! Traceroute output parsing and schema definitions.
//!
//! This module handles:
//! - Splitting a transcript into hop lines
//! - Recovering address, hostname and RTT samples from each line
//! - Defining output schema

pub mod hop;
pub mod schema;
pub mod traceroute;

// Re-export main types
pub use hop::{HopRecord, RttSamples};
pub use schema::{HopSummary, TraceReport, TracedHop};
pub use traceroute::{parse_hop_line, parse_traceroute};
