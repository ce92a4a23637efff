use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Failed to load report {}", file_path.display()))?;

    let timeouts = report.hops.iter().filter(|h| h.record.is_timeout()).count();

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Destination: {}", report.destination);
    println!("  Traces: {}", report.num_traces);
    println!("  Hop Records: {} ({} fully timed out)", report.hops.len(), timeouts);
    println!("  Distinct Hops: {}", report.summary.len());
    println!("  Generated: {}", report.generated_at);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Hoptrace Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  destination: string      - Traced hostname or address");
        println!("  num_traces: number       - Number of traceroute runs");
        println!("  interval_secs: number    - Pause between runs");
        println!("  hops: array              - Every hop of every run");
        println!("    trace_num: number      - 1-based run index");
        println!("    timestamp: string      - Run time (HH:MM:SS)");
        println!("    hop_number: number     - Distance from the source");
        println!("    ip_address: string?    - Responding address");
        println!("    hostname: string?      - Name, when distinct from the address");
        println!("    rtt_samples: array     - Three RTTs in ms, null = timeout");
        println!("    avg_rtt: number?       - Mean of answered probes");
        println!("  summary: array           - Per-hop statistics across runs");
        println!("    hop_number: number     - Distance from the source");
        println!("    ip_addresses: array    - Distinct responding addresses");
        println!("    hostnames: array       - Distinct hostnames");
        println!("    samples_sent: number   - Probes sent");
        println!("    samples_received: number - Probes answered");
        println!("    loss_percentage: number - Share of probes lost");
        println!("    mean_rtt/min_rtt/max_rtt: number? - RTT statistics");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Hoptrace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Repeated traceroute sampling with per-hop RTT statistics.");
}
