use crate::chart::ChartConfig;
use crate::parser::TraceReport;
use crate::utils::config::{
    DEFAULT_INTERVAL, DEFAULT_NUM_TRACES, DEFAULT_OUTPUT_DIR, DEFAULT_TRACE_PROGRAM,
};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the trace command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TraceArgs {
    /// Hostname or address to trace
    pub destination: String,

    /// Number of traceroute runs
    pub num_traces: u32,

    /// Pause between runs
    pub interval: Duration,

    /// Directory for the JSON report and SVG chart
    pub output_dir: PathBuf,

    /// Maximum TTL passed to the tool
    pub max_hops: Option<u32>,

    /// Tracing program to run
    pub program: String,

    /// Render the SVG chart
    pub write_chart: bool,

    /// Chart configuration (title defaults to the destination)
    pub chart_config: Option<ChartConfig>,

    /// Print the average RTT table to stdout
    pub print_summary: bool,
}

impl Default for TraceArgs {
    fn default() -> Self {
        Self {
            destination: String::new(),
            num_traces: DEFAULT_NUM_TRACES,
            interval: DEFAULT_INTERVAL,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_hops: None,
            program: DEFAULT_TRACE_PROGRAM.to_string(),
            write_chart: true,
            chart_config: None,
            print_summary: false,
        }
    }
}

/// What a finished sampling session produced
#[derive(Debug, Clone)]
pub struct TraceRunOutcome {
    pub report: TraceReport,
    pub report_path: PathBuf,

    /// `None` when charting was disabled or there was nothing to plot
    pub chart_path: Option<PathBuf>,
}
