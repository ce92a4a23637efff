//! Parse command implementation.
//!
//! Parses a saved traceroute transcript without running the tool.

use crate::parser::{parse_traceroute, HopRecord};
use anyhow::{Context, Result};
use log::info;
use std::io::Read;
use std::path::Path;

/// Read a transcript from a file, or stdin for `None` / `-`
pub fn read_transcript(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read transcript from stdin")?;
            Ok(buffer)
        }
    }
}

/// Parse a transcript and render the hop records as JSON
pub fn render_hops(transcript: &str, compact: bool) -> Result<String> {
    let hops: Vec<HopRecord> = parse_traceroute(transcript);
    info!("Parsed {} hops", hops.len());

    let json = if compact {
        serde_json::to_string(&hops)
    } else {
        serde_json::to_string_pretty(&hops)
    };

    json.context("Failed to serialize hop records")
}

/// Execute the parse command
pub fn execute_parse(input: Option<&Path>, compact: bool) -> Result<()> {
    let transcript = read_transcript(input)?;
    println!("{}", render_hops(&transcript, compact)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_transcript_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "traceroute to x\n 1  * * *\n").unwrap();

        let text = read_transcript(Some(file.path())).unwrap();
        assert!(text.starts_with("traceroute to x"));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_transcript(Some(Path::new("/nonexistent/hoptrace.txt"))).is_err());
    }

    #[test]
    fn test_render_hops_compact() {
        let json = render_hops("header\n 3  * * *\n", true).unwrap();
        assert_eq!(
            json,
            r#"[{"hop_number":3,"ip_address":null,"hostname":null,"rtt_samples":[null,null,null]}]"#
        );
    }

    #[test]
    fn test_render_empty_transcript() {
        assert_eq!(render_hops("", true).unwrap(), "[]");
    }
}
