//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod parse;
pub mod trace;
pub mod utils;

// Re-export main command functions
pub use models::{TraceArgs, TraceRunOutcome};
pub use parse::execute_parse;
pub use trace::{collect_samples, execute_trace, execute_trace_with, validate_args};
pub use utils::{display_schema, display_version, validate_report_file};
