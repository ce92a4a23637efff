//! Trace command implementation.
//!
//! The trace command:
//! 1. Runs traceroute N times, pausing between runs
//! 2. Parses each transcript into hop records
//! 3. Tags records with run index and timestamp
//! 4. Summarizes hops across runs
//! 5. Renders the RTT chart
//! 6. Writes output files

use super::models::{TraceArgs, TraceRunOutcome};
use crate::aggregator::{average_rtt_by_hop, summarize_hops, tag_records, trace_series};
use crate::chart::{generate_chart, generate_text_summary, ChartConfig};
use crate::executor::{TraceExecutor, TraceSource};
use crate::output::{write_report, write_svg};
use crate::parser::{parse_traceroute, TraceReport, TracedHop};
use crate::utils::config::{FILE_TIMESTAMP_FORMAT, SCHEMA_VERSION, TIMESTAMP_FORMAT};
use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use log::{debug, info, warn};
use std::path::Path;
use std::time::{Duration, Instant};

/// Validate trace command arguments
///
/// **Public** - called before execution so bad input fails fast
pub fn validate_args(args: &TraceArgs) -> Result<()> {
    if args.destination.trim().is_empty() {
        bail!("Destination cannot be empty");
    }

    if args.num_traces == 0 {
        bail!("Number of traces must be at least 1");
    }

    if args.program.trim().is_empty() {
        bail!("Trace program cannot be empty");
    }

    if let Some(config) = &args.chart_config {
        if config.width == 0 || config.height == 0 {
            bail!("Chart dimensions must be greater than 0");
        }
    }

    Ok(())
}

/// Execute the trace command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * File write errors
///
/// A failed traceroute run is not an error: it is logged and counted as
/// a run with zero hops.
pub fn execute_trace(args: TraceArgs) -> Result<TraceRunOutcome> {
    let executor = TraceExecutor::new()
        .with_program(args.program.clone())
        .with_max_hops(args.max_hops);

    execute_trace_with(&args, &executor, &mut std::thread::sleep)
}

/// Execute the trace command against any trace source
///
/// **Public** - lets callers substitute the source and the sleep function
pub fn execute_trace_with(
    args: &TraceArgs,
    source: &dyn TraceSource,
    sleep: &mut dyn FnMut(Duration),
) -> Result<TraceRunOutcome> {
    let start_time = Instant::now();

    info!("Starting {} traces to {}", args.num_traces, args.destination);

    // Steps 1-3: Run, parse and tag
    info!("Steps 1-3/6: Running traces...");
    let hops = collect_samples(
        &args.destination,
        args.num_traces,
        args.interval,
        source,
        sleep,
    );

    // Step 4: Summarize
    info!("Step 4/6: Summarizing {} hop records...", hops.len());
    let report = build_report(args, hops);

    let stem = output_stem(&args.destination, &Local::now().format(FILE_TIMESTAMP_FORMAT).to_string());
    let report_path = args.output_dir.join(format!("{}.json", stem));

    // Step 5: Chart
    let chart_path = if args.write_chart {
        info!("Step 5/6: Rendering RTT chart...");
        let path = args.output_dir.join(format!("{}.svg", stem));
        write_chart(&report, args.chart_config.as_ref(), &path)?.then_some(path)
    } else {
        info!("Step 5/6: Skipping chart (not requested)");
        None
    };

    // Step 6: Write report
    info!("Step 6/6: Writing report...");
    write_report(&report, &report_path).context("Failed to write trace report")?;
    info!("✓ Report written to: {}", report_path.display());

    if args.print_summary {
        println!();
        println!(
            "{}",
            generate_text_summary(&args.destination, &average_rtt_by_hop(&report.hops))
        );
        println!();
    }

    info!(
        "Trace session completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(TraceRunOutcome {
        report,
        report_path,
        chart_path,
    })
}

/// Run the tool `num_traces` times and tag every parsed hop
///
/// **Public** - the sampling loop on its own, without any file output
pub fn collect_samples(
    destination: &str,
    num_traces: u32,
    interval: Duration,
    source: &dyn TraceSource,
    sleep: &mut dyn FnMut(Duration),
) -> Vec<TracedHop> {
    let mut all_hops = Vec::new();

    for i in 0..num_traces {
        if i > 0 {
            info!("Waiting {} seconds before next trace...", interval.as_secs_f64());
            sleep(interval);
        }

        let trace_num = i + 1;
        info!("Trace {}/{}...", trace_num, num_traces);

        let raw_output = match source.trace(destination) {
            Ok(output) => output.into_text(),
            Err(e) => {
                warn!("Trace {} to {} failed: {}", trace_num, destination, e);
                String::new()
            }
        };

        let records = parse_traceroute(&raw_output);
        debug!("Trace {} produced {} hops", trace_num, records.len());

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        all_hops.extend(tag_records(records, trace_num, &timestamp));
    }

    all_hops
}

/// Assemble the report for a finished session
///
/// **Private** - internal helper for execute_trace_with
fn build_report(args: &TraceArgs, hops: Vec<TracedHop>) -> TraceReport {
    TraceReport {
        version: SCHEMA_VERSION.to_string(),
        destination: args.destination.clone(),
        num_traces: args.num_traces,
        interval_secs: args.interval.as_secs(),
        summary: summarize_hops(&hops),
        hops,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Render and write the chart; `false` when there was nothing to plot
///
/// **Private** - internal helper for execute_trace_with
fn write_chart(report: &TraceReport, config: Option<&ChartConfig>, path: &Path) -> Result<bool> {
    let config = config
        .cloned()
        .unwrap_or_else(|| ChartConfig::new().with_title(format!("Traceroute Analysis for {}", report.destination)));

    let svg = match generate_chart(&trace_series(&report.hops), Some(&config)) {
        Ok(svg) => svg,
        Err(e) => {
            warn!("Skipping chart: {}", e);
            return Ok(false);
        }
    };

    write_svg(&svg, path).context("Failed to write RTT chart")?;
    info!("✓ Chart written to: {}", path.display());

    Ok(true)
}

/// `trace_<destination with dots as dashes>_<timestamp>`
fn output_stem(destination: &str, timestamp: &str) -> String {
    let safe_destination: String = destination
        .trim()
        .chars()
        .map(|c| match c {
            '.' | ':' => '-',
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => c,
            _ => '_',
        })
        .collect();

    format!("trace_{}_{}", safe_destination, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args() {
        let mut args = TraceArgs {
            destination: "example.com".to_string(),
            ..TraceArgs::default()
        };
        assert!(validate_args(&args).is_ok());

        args.num_traces = 0;
        assert!(validate_args(&args).is_err());

        args.num_traces = 1;
        args.destination = "  ".to_string();
        assert!(validate_args(&args).is_err());

        args.destination = "example.com".to_string();
        args.chart_config = Some(ChartConfig::new().with_size(0, 600));
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(
            output_stem("google.com", "20240101-120000"),
            "trace_google-com_20240101-120000"
        );
        assert_eq!(output_stem("::1", "t"), "trace_--1_t");
        assert_eq!(output_stem("a/b", "t"), "trace_a_b_t");
    }
}
