use hoptrace::commands::{collect_samples, execute_trace_with, validate_args, TraceArgs};
use hoptrace::executor::{TraceOutput, TraceSource};
use hoptrace::output::read_report;
use hoptrace::utils::ExecutorError;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::time::Duration;

const TRANSCRIPT: &str = "traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets
 1  gateway (192.168.1.1)  1.0 ms  2.0 ms  3.0 ms
 2  * * *
 3  edge.example.net (203.0.113.3)  10.0 ms  * 12.0 ms
";

/// Replays a canned transcript, failing on the listed runs
struct CannedSource {
    calls: Cell<u32>,
    fail_on: Vec<u32>,
}

impl CannedSource {
    fn new(fail_on: Vec<u32>) -> Self {
        Self {
            calls: Cell::new(0),
            fail_on,
        }
    }
}

impl TraceSource for CannedSource {
    fn trace(&self, destination: &str) -> Result<TraceOutput, ExecutorError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);

        if self.fail_on.contains(&call) {
            return Err(ExecutorError::NonZeroExit {
                code: Some(1),
                stderr: "unknown host".to_string(),
            });
        }

        Ok(TraceOutput {
            destination: destination.to_string(),
            stdout: TRANSCRIPT.to_string(),
            elapsed: Duration::from_millis(10),
        })
    }
}

#[test]
fn test_collect_samples_tags_runs_and_sleeps_between() {
    let source = CannedSource::new(vec![]);
    let mut sleeps = Vec::new();

    let hops = collect_samples(
        "example.com",
        3,
        Duration::from_secs(5),
        &source,
        &mut |d| sleeps.push(d),
    );

    assert_eq!(hops.len(), 9);
    assert_eq!(sleeps, vec![Duration::from_secs(5); 2]);

    let runs: Vec<u32> = hops.iter().map(|h| h.trace_num).collect();
    assert_eq!(runs, vec![1, 1, 1, 2, 2, 2, 3, 3, 3]);

    assert_eq!(hops[0].avg_rtt, Some(2.0));
    assert_eq!(hops[1].avg_rtt, None);
    assert_eq!(hops[2].avg_rtt, Some(11.0));
}

#[test]
fn test_failed_run_counts_as_zero_hops() {
    let source = CannedSource::new(vec![2]);

    let hops = collect_samples("example.com", 3, Duration::ZERO, &source, &mut |_| {});

    assert_eq!(hops.len(), 6);
    assert!(hops.iter().all(|h| h.trace_num != 2));
}

#[test]
fn test_execute_trace_writes_report_and_chart() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = TraceArgs {
        destination: "example.com".to_string(),
        num_traces: 2,
        interval: Duration::from_secs(1),
        output_dir: temp_dir.path().to_path_buf(),
        ..TraceArgs::default()
    };
    validate_args(&args).unwrap();

    let source = CannedSource::new(vec![]);
    let outcome = execute_trace_with(&args, &source, &mut |_| {}).unwrap();

    assert!(outcome.report_path.exists());
    let file_name = outcome.report_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("trace_example-com_"));
    assert!(file_name.ends_with(".json"));

    let chart_path = outcome.chart_path.expect("chart should be written");
    let svg = std::fs::read_to_string(chart_path).unwrap();
    assert!(svg.contains("Traceroute Analysis for example.com"));
    assert!(svg.contains("Trace 2 ("));

    let report = read_report(&outcome.report_path).unwrap();
    assert_eq!(report.num_traces, 2);
    assert_eq!(report.hops.len(), 6);
    assert_eq!(report.summary.len(), 3);
    assert_eq!(report.summary[1].loss_percentage, 100.0);
    assert_eq!(report.summary[2].samples_received, 4);
}

#[test]
fn test_execute_trace_without_any_hops_skips_chart() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = TraceArgs {
        destination: "unreachable.invalid".to_string(),
        num_traces: 1,
        output_dir: temp_dir.path().to_path_buf(),
        ..TraceArgs::default()
    };

    let source = CannedSource::new(vec![1]);
    let outcome = execute_trace_with(&args, &source, &mut |_| {}).unwrap();

    assert!(outcome.chart_path.is_none());
    assert!(outcome.report.hops.is_empty());
    assert!(outcome.report_path.exists());
}
