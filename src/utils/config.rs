//! Configuration and constants for the CLI.

use std::time::Duration;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Tracing tool invoked when no program is given
pub const DEFAULT_TRACE_PROGRAM: &str = "traceroute";

/// Number of traces per sampling session
pub const DEFAULT_NUM_TRACES: u32 = 3;

/// Pause between consecutive traces
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Directory that receives reports and charts
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Probes per hop line. traceroute sends three by default.
pub const RTT_SLOTS: usize = 3;

/// Value substituted for the tool's `<1 ms` notation
pub const SUB_MILLISECOND_RTT: f64 = 0.5;

/// Marker that enables sub-millisecond normalization on a line
pub const SUB_MILLISECOND_MARKER: &str = "<1";

// Timestamp formats (chrono strftime syntax)
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
