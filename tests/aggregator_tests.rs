use hoptrace::aggregator::{average_rtt_by_hop, summarize_hops, tag_records, trace_series};
use hoptrace::chart::generate_chart;
use hoptrace::parser::parse_traceroute;

const RUN_A: &str = "traceroute to example.com
 1  gw (10.0.0.1)  1.0 ms  1.0 ms  1.0 ms
 2  isp (100.64.0.1)  8.0 ms  * 10.0 ms
 3  * * *
";

const RUN_B: &str = "traceroute to example.com
 1  gw (10.0.0.1)  3.0 ms  3.0 ms  3.0 ms
 2  isp-b (100.64.0.2)  12.0 ms  12.0 ms  12.0 ms
 3  * * *
";

#[test]
fn test_statistics_across_runs() {
    let mut hops = tag_records(parse_traceroute(RUN_A), 1, "10:00:00");
    hops.extend(tag_records(parse_traceroute(RUN_B), 2, "10:00:05"));

    assert_eq!(
        average_rtt_by_hop(&hops),
        vec![(1, Some(2.0)), (2, Some(10.5)), (3, None)]
    );

    let summary = summarize_hops(&hops);
    assert_eq!(summary.len(), 3);
    assert_eq!(summary[1].ip_addresses, vec!["100.64.0.1", "100.64.0.2"]);
    assert_eq!(summary[1].hostnames, vec!["isp", "isp-b"]);
    assert_eq!(summary[1].samples_received, 5);
    assert_eq!(summary[2].loss_percentage, 100.0);
}

#[test]
fn test_series_feed_chart() {
    let mut hops = tag_records(parse_traceroute(RUN_A), 1, "10:00:00");
    hops.extend(tag_records(parse_traceroute(RUN_B), 2, "10:00:05"));

    let series = trace_series(&hops);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].points, vec![(1, Some(1.0)), (2, Some(9.0)), (3, None)]);

    let svg = generate_chart(&series, None).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 2);
}
