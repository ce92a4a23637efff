//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! The hop parser has no error type: malformed lines are skipped.

use thiserror::Error;

/// Errors that can occur while running the tracing tool
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Traceroute failed with return code {}: {stderr}", display_code(.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("Destination is empty")]
    EmptyDestination,
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No trace series to plot")]
    EmptySeries,

    #[error("Every hop timed out, nothing to plot")]
    NoSamples,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
