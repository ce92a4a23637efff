//! Group tagged hops into one series per traceroute run.

use crate::parser::TracedHop;
use std::collections::BTreeMap;

/// Points of a single run, in the order the hops were printed
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSeries {
    pub trace_num: u32,

    /// Timestamp of the run, used in the legend
    pub timestamp: String,

    /// `(hop_number, avg_rtt)`; `None` marks a silent hop
    pub points: Vec<(u32, Option<f64>)>,
}

impl TraceSeries {
    pub fn label(&self) -> String {
        format!("Trace {} ({})", self.trace_num, self.timestamp)
    }
}

/// Split tagged hops by run, ordered by run index
pub fn trace_series(hops: &[TracedHop]) -> Vec<TraceSeries> {
    let mut by_trace: BTreeMap<u32, TraceSeries> = BTreeMap::new();

    for hop in hops {
        by_trace
            .entry(hop.trace_num)
            .or_insert_with(|| TraceSeries {
                trace_num: hop.trace_num,
                timestamp: hop.timestamp.clone(),
                points: Vec::new(),
            })
            .points
            .push((hop.record.hop_number, hop.avg_rtt));
    }

    by_trace.into_values().collect()
}
