//! Invocation of the external tracing tool.
//!
//! The executor reports failures as values; callers decide whether a failed
//! run aborts anything or simply counts as zero hops.

pub mod command;
pub mod types;

pub use command::{text_or_empty, TraceExecutor};
pub use types::{TraceOutput, TraceSource};
