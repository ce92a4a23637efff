//! Output JSON schema definitions for trace reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use super::hop::HopRecord;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Hostname or address that was traced
    pub destination: String,

    /// Number of traceroute runs in this session
    pub num_traces: u32,

    /// Pause between runs, in seconds
    pub interval_secs: u64,

    /// Every hop of every run, tagged with its run
    pub hops: Vec<TracedHop>,

    /// Per-hop statistics across all runs
    pub summary: Vec<HopSummary>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// A hop record tagged with the run that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracedHop {
    /// 1-based run index
    pub trace_num: u32,

    /// Wall-clock time the run finished (HH:MM:SS)
    pub timestamp: String,

    #[serde(flatten)]
    pub record: HopRecord,

    /// Mean of the samples that answered
    pub avg_rtt: Option<f64>,
}

/// Statistics for one hop number across runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopSummary {
    pub hop_number: u32,

    /// Distinct responding addresses, first seen first
    pub ip_addresses: Vec<String>,

    /// Distinct hostnames, first seen first
    pub hostnames: Vec<String>,

    /// Probes sent (three per record)
    pub samples_sent: usize,

    /// Probes that produced a timing
    pub samples_received: usize,

    /// Share of probes that timed out
    pub loss_percentage: f64,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mean_rtt: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_rtt: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_rtt: Option<f64>,
}
