//! Calculate RTT statistics from hop records.
//!
//! Timed-out probes never contribute to a mean; a hop where every probe
//! timed out has no average at all rather than an average of zero.

use crate::parser::{HopRecord, HopSummary, TracedHop};
use crate::utils::config::RTT_SLOTS;
use log::debug;
use std::collections::BTreeMap;

/// Mean of the samples that answered
///
/// **Public** - used for each record and for cross-run averages
///
/// Returns `None` when every sample is missing.
pub fn average_rtt(samples: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = samples.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

/// Tag one run's records with its index and timestamp
///
/// **Public** - used by the trace command after each run
pub fn tag_records(records: Vec<HopRecord>, trace_num: u32, timestamp: &str) -> Vec<TracedHop> {
    records
        .into_iter()
        .map(|record| TracedHop {
            trace_num,
            timestamp: timestamp.to_string(),
            avg_rtt: average_rtt(&record.rtt_samples),
            record,
        })
        .collect()
}

/// Running totals for one hop number
#[derive(Default)]
struct HopAccumulator {
    ip_addresses: Vec<String>,
    hostnames: Vec<String>,
    records: usize,
    rtts: Vec<f64>,
}

impl HopAccumulator {
    fn add(&mut self, record: &HopRecord) {
        self.records += 1;
        self.rtts.extend(record.rtt_samples.iter().flatten());
        push_distinct(&mut self.ip_addresses, record.ip_address.as_deref());
        push_distinct(&mut self.hostnames, record.hostname.as_deref());
    }

    fn finish(self, hop_number: u32) -> HopSummary {
        let samples_sent = self.records * RTT_SLOTS;
        let samples_received = self.rtts.len();
        let loss_percentage = if samples_sent > 0 {
            (samples_sent - samples_received) as f64 / samples_sent as f64 * 100.0
        } else {
            0.0
        };

        let mean_rtt = (samples_received > 0)
            .then(|| self.rtts.iter().sum::<f64>() / samples_received as f64);
        let min_rtt = self.rtts.iter().copied().reduce(f64::min);
        let max_rtt = self.rtts.iter().copied().reduce(f64::max);

        HopSummary {
            hop_number,
            ip_addresses: self.ip_addresses,
            hostnames: self.hostnames,
            samples_sent,
            samples_received,
            loss_percentage,
            mean_rtt,
            min_rtt,
            max_rtt,
        }
    }
}

fn push_distinct(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value {
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
}

/// Summarize every hop number across all runs
///
/// **Public** - main entry point for report statistics
///
/// # Returns
/// One summary per distinct hop number, sorted by hop number
pub fn summarize_hops(hops: &[TracedHop]) -> Vec<HopSummary> {
    let mut by_hop: BTreeMap<u32, HopAccumulator> = BTreeMap::new();

    for hop in hops {
        by_hop
            .entry(hop.record.hop_number)
            .or_default()
            .add(&hop.record);
    }

    debug!("Summarized {} records into {} hops", hops.len(), by_hop.len());

    by_hop
        .into_iter()
        .map(|(hop_number, acc)| acc.finish(hop_number))
        .collect()
}

/// Mean of the per-record averages, grouped by hop number
///
/// **Public** - the table printed at the end of a session
pub fn average_rtt_by_hop(hops: &[TracedHop]) -> Vec<(u32, Option<f64>)> {
    let mut by_hop: BTreeMap<u32, Vec<Option<f64>>> = BTreeMap::new();

    for hop in hops {
        by_hop
            .entry(hop.record.hop_number)
            .or_default()
            .push(hop.avg_rtt);
    }

    by_hop
        .into_iter()
        .map(|(hop_number, averages)| (hop_number, average_rtt(&averages)))
        .collect()
}
