//! Hoptrace CLI
//!
//! Runs traceroute repeatedly against a destination, parses every hop,
//! and writes a JSON report plus an SVG chart of average RTT by hop.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use hoptrace::chart::ChartConfig;
use hoptrace::commands::{
    display_schema, display_version, execute_parse, execute_trace, validate_args,
    validate_report_file, TraceArgs,
};

/// Hoptrace - traceroute sampling and RTT analysis
#[derive(Parser, Debug)]
#[command(name = "hoptrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run traceroute repeatedly and analyze the hops
    Trace {
        /// Hostname or IP address to trace
        destination: String,

        /// Number of traces to run
        #[arg(short = 'n', long = "traces", default_value = "3")]
        traces: u32,

        /// Seconds to wait between traces
        #[arg(short, long, default_value = "5")]
        interval: u64,

        /// Directory for the report and chart
        #[arg(short, long, default_value = "output", env = "HOPTRACE_OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Maximum number of hops to probe
        #[arg(long)]
        max_hops: Option<u32>,

        /// Tracing program to run
        #[arg(long, default_value = "traceroute", env = "HOPTRACE_PROGRAM")]
        program: String,

        /// Do not render the SVG chart
        #[arg(long)]
        no_chart: bool,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Chart width in pixels
        #[arg(long, default_value = "1200")]
        width: usize,

        /// Chart height in pixels
        #[arg(long, default_value = "600")]
        height: usize,

        /// Print average RTT by hop to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Parse a saved traceroute transcript and print hops as JSON
    Parse {
        /// Transcript file (stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Trace {
            destination,
            traces,
            interval,
            output_dir,
            max_hops,
            program,
            no_chart,
            title,
            width,
            height,
            summary,
        } => {
            let mut chart_config = ChartConfig::new().with_size(width, height);
            chart_config = match title {
                Some(title) => chart_config.with_title(title),
                None => chart_config.with_title(format!("Traceroute Analysis for {}", destination)),
            };

            let args = TraceArgs {
                destination,
                num_traces: traces,
                interval: Duration::from_secs(interval),
                output_dir,
                max_hops,
                program,
                write_chart: !no_chart,
                chart_config: Some(chart_config),
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            let outcome = execute_trace(args)?;
            println!("Report saved to: {}", outcome.report_path.display());
            if let Some(chart_path) = outcome.chart_path {
                println!("Chart saved to: {}", chart_path.display());
            }
        }

        Commands::Parse { file, compact } => {
            execute_parse(file.as_deref(), compact)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
