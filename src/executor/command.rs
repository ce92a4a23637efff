//! Runs `traceroute` as a child process.

use super::types::{TraceOutput, TraceSource};
use crate::utils::config::DEFAULT_TRACE_PROGRAM;
use crate::utils::error::ExecutorError;
use log::{debug, info, warn};
use std::process::Command;
use std::time::Instant;

/// Process-backed trace source
#[derive(Debug, Clone)]
pub struct TraceExecutor {
    program: String,
    extra_args: Vec<String>,
    max_hops: Option<u32>,
}

impl Default for TraceExecutor {
    fn default() -> Self {
        Self {
            program: DEFAULT_TRACE_PROGRAM.to_string(),
            extra_args: Vec::new(),
            max_hops: None,
        }
    }
}

impl TraceExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Limit the probe TTL (`-m`)
    pub fn with_max_hops(mut self, max_hops: Option<u32>) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program, destination last
    pub fn arguments(&self, destination: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(self.extra_args.len() + 3);
        if let Some(max_hops) = self.max_hops {
            args.push("-m".to_string());
            args.push(max_hops.to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args.push(destination.to_string());
        args
    }

    /// Run the tool once and capture its stdout
    ///
    /// # Errors
    /// * `ExecutorError::EmptyDestination` - Blank destination
    /// * `ExecutorError::Spawn` - Program missing or not executable
    /// * `ExecutorError::NonZeroExit` - Tool ran but reported failure
    pub fn execute(&self, destination: &str) -> Result<TraceOutput, ExecutorError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(ExecutorError::EmptyDestination);
        }

        let args = self.arguments(destination);
        debug!("Running: {} {}", self.program, args.join(" "));

        let start = Instant::now();
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| ExecutorError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        let elapsed = start.elapsed();

        if !output.status.success() {
            return Err(ExecutorError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        info!(
            "Trace to {} finished in {:.2}s ({} bytes)",
            destination,
            elapsed.as_secs_f64(),
            stdout.len()
        );

        Ok(TraceOutput {
            destination: destination.to_string(),
            stdout,
            elapsed,
        })
    }
}

impl TraceSource for TraceExecutor {
    fn trace(&self, destination: &str) -> Result<TraceOutput, ExecutorError> {
        self.execute(destination)
    }
}

/// Collapse a run result to its text, logging and returning "" on failure
pub fn text_or_empty(result: Result<TraceOutput, ExecutorError>) -> String {
    match result {
        Ok(output) => output.into_text(),
        Err(e) => {
            warn!("Traceroute failed: {}", e);
            String::new()
        }
    }
}
