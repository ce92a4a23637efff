//! Statistics over parsed hop records.
//!
//! This module transforms parsed traceroute runs into:
//! - Per-record average RTT (timeouts excluded)
//! - Per-hop summaries across runs (loss, mean/min/max)
//! - One series per run, for charting

pub mod metrics;
pub mod series;

// Re-export main types and functions
pub use metrics::{average_rtt, average_rtt_by_hop, summarize_hops, tag_records};
pub use series::{trace_series, TraceSeries};
