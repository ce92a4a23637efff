//! Types shared by trace sources.

use crate::utils::error::ExecutorError;
use std::time::Duration;

/// Captured output of one successful traceroute run
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOutput {
    /// Destination as passed to the tool
    pub destination: String,

    /// Raw stdout, header line included
    pub stdout: String,

    /// Wall time spent in the tool
    pub elapsed: Duration,
}

impl TraceOutput {
    pub fn into_text(self) -> String {
        self.stdout
    }
}

/// Anything that can produce a traceroute transcript for a destination
///
/// The sampler is written against this trait so tests can feed canned
/// transcripts instead of spawning processes.
pub trait TraceSource {
    fn trace(&self, destination: &str) -> Result<TraceOutput, ExecutorError>;
}
