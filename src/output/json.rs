//! JSON report output writer.
//!
//! Writes TraceReport structs to JSON files with proper formatting.

use crate::parser::schema::TraceReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &TraceReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report in memory
///
/// **Public** - useful for printing to stdout
pub fn report_to_string(report: &TraceReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Reject unusable paths and create missing parent directories
///
/// **Crate** - shared with the SVG writer
pub(crate) fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<TraceReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: TraceReport =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, destination {}",
        report.version, report.destination
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{summarize_hops, tag_records};
    use crate::parser::HopRecord;
    use tempfile::NamedTempFile;

    fn create_test_report() -> TraceReport {
        let hops = tag_records(
            vec![
                HopRecord::new(1, Some("10.0.0.1".to_string()), None, [Some(1.0), Some(2.0), None]),
                HopRecord::timed_out(2),
            ],
            1,
            "12:00:00",
        );
        TraceReport {
            version: "1.0.0".to_string(),
            destination: "example.com".to_string(),
            num_traces: 1,
            interval_secs: 5,
            summary: summarize_hops(&hops),
            hops,
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.destination, report.destination);
        assert_eq!(loaded.hops, report.hops);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn test_prepare_output_path_empty() {
        assert!(prepare_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_prepare_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(prepare_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_report_flattens_hop_fields() {
        let json = report_to_string(&create_test_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value["hops"][0];
        assert_eq!(first["trace_num"], 1);
        assert_eq!(first["hop_number"], 1);
        assert_eq!(first["ip_address"], "10.0.0.1");
        assert_eq!(first["avg_rtt"], 1.5);
    }
}
