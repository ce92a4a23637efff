//! SVG line chart of average RTT by hop.
//!
//! Hand-rolled SVG keeps the dependency tree small:
//! - X axis: hop number (integer ticks)
//! - Y axis: average RTT in ms
//! - One polyline per run; silent hops break the line

use crate::aggregator::TraceSeries;
use crate::utils::error::ChartError;
use log::info;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 190.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MAX_X_TICKS: u32 = 20;
const Y_TICKS: u32 = 5;

/// Line colors, reused when there are more runs than entries
const PALETTE: &[&str] = &[
    "rgb(31, 119, 180)",
    "rgb(255, 127, 14)",
    "rgb(44, 160, 44)",
    "rgb(214, 39, 40)",
    "rgb(148, 103, 189)",
    "rgb(140, 86, 75)",
    "rgb(227, 119, 194)",
    "rgb(127, 127, 127)",
];

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Traceroute Analysis".to_string(),
            width: 1200,
            height: 600,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Maps data coordinates onto the plot area
struct Plot {
    min_hop: u32,
    max_hop: u32,
    max_rtt: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn x(&self, hop: u32) -> f64 {
        let span = f64::from(self.max_hop - self.min_hop).max(1.0);
        self.left + f64::from(hop - self.min_hop) / span * self.width
    }

    fn y(&self, rtt: f64) -> f64 {
        self.top + self.height - rtt / self.max_rtt * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Generate an SVG chart from per-run series
///
/// # Errors
/// * `ChartError::EmptySeries` - No runs, or runs without hops
/// * `ChartError::NoSamples` - Every hop of every run timed out
pub fn generate_chart(series: &[TraceSeries], config: Option<&ChartConfig>) -> Result<String, ChartError> {
    let hops: Vec<u32> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(hop, _)| hop))
        .collect();
    let (Some(&min_hop), Some(&max_hop)) = (hops.iter().min(), hops.iter().max()) else {
        return Err(ChartError::EmptySeries);
    };

    let max_rtt = series
        .iter()
        .flat_map(|s| s.points.iter().filter_map(|&(_, rtt)| rtt))
        .reduce(f64::max)
        .ok_or(ChartError::NoSamples)?;

    let config = config.cloned().unwrap_or_default();
    info!("Generating chart with {} series", series.len());

    let width = config.width as f64;
    let height = config.height as f64;
    let plot = Plot {
        min_hop,
        max_hop,
        max_rtt: nice_ceiling(max_rtt * 1.1),
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
    };

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));
    svg.push_str(r#"<style>text { font-family: sans-serif; } .grid { stroke: #bbb; stroke-dasharray: 4 3; stroke-opacity: 0.7; }</style>"#);
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

    svg.push_str(&format!(
        r#"<text x="{:.1}" y="28" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        plot.left + plot.width / 2.0,
        escape_xml(&config.title)
    ));

    render_axes(&plot, &mut svg);

    for (i, s) in series.iter().enumerate() {
        render_series(&plot, s, PALETTE[i % PALETTE.len()], &mut svg);
    }

    render_legend(&plot, series, &mut svg);

    svg.push_str("</svg>");

    info!("Chart generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Round up to 1, 2 or 5 times a power of ten
fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|m| m * magnitude >= value)
        .unwrap_or(10.0);
    step * magnitude
}

fn render_axes(plot: &Plot, out: &mut String) {
    let right = plot.left + plot.width;
    let bottom = plot.bottom();

    // Y grid and labels
    for i in 0..=Y_TICKS {
        let rtt = plot.max_rtt * f64::from(i) / f64::from(Y_TICKS);
        let y = plot.y(rtt);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" class="grid"/>"#,
            plot.left, y, right, y
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{}</text>"#,
            plot.left - 6.0,
            y + 4.0,
            format_rtt(rtt)
        ));
    }

    // X grid and labels, integer hops only
    let span = plot.max_hop - plot.min_hop;
    let step = span.div_ceil(MAX_X_TICKS).max(1);
    for hop in (plot.min_hop..=plot.max_hop).step_by(step as usize) {
        let x = plot.x(hop);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" class="grid"/>"#,
            x, plot.top, x, bottom
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
            x,
            bottom + 16.0,
            hop
        ));
    }

    out.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
        plot.left, plot.top, plot.width, plot.height
    ));

    out.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">Hop Number</text>"#,
        plot.left + plot.width / 2.0,
        bottom + 40.0
    ));
    out.push_str(&format!(
        r#"<text x="18" y="{:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 18 {:.1})">Average Round Trip Time (ms)</text>"#,
        plot.top + plot.height / 2.0,
        plot.top + plot.height / 2.0
    ));
}

fn render_series(plot: &Plot, series: &TraceSeries, color: &str, out: &mut String) {
    // Consecutive answered hops form one segment
    let mut segment: Vec<String> = Vec::new();

    for &(hop, rtt) in &series.points {
        match rtt {
            Some(rtt) => segment.push(format!("{:.1},{:.1}", plot.x(hop), plot.y(rtt))),
            None => push_polyline(&mut segment, color, out),
        }
    }
    push_polyline(&mut segment, color, out);

    for &(hop, rtt) in &series.points {
        if let Some(rtt) = rtt {
            out.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"><title>{}: hop {} {} ms</title></circle>"#,
                plot.x(hop),
                plot.y(rtt),
                color,
                escape_xml(&series.label()),
                hop,
                format_rtt(rtt)
            ));
        }
    }
}

/// Emit the pending segment (single points get only a marker) and reset it
fn push_polyline(segment: &mut Vec<String>, color: &str, out: &mut String) {
    if segment.len() > 1 {
        out.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            segment.join(" "),
            color
        ));
    }
    segment.clear();
}

fn render_legend(plot: &Plot, series: &[TraceSeries], out: &mut String) {
    let x = plot.left + plot.width + 15.0;

    for (i, s) in series.iter().enumerate() {
        let y = plot.top + 10.0 + i as f64 * 20.0;
        let color = PALETTE[i % PALETTE.len()];
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/>"#,
            x,
            y,
            x + 20.0,
            y,
            color
        ));
        out.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"/>"#,
            x + 10.0,
            y,
            color
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" class="legend">{}</text>"#,
            x + 26.0,
            y + 4.0,
            escape_xml(&s.label())
        ));
    }
}

fn format_rtt(rtt: f64) -> String {
    if rtt >= 10.0 || rtt == 0.0 {
        format!("{:.0}", rtt)
    } else {
        format!("{:.1}", rtt)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Plain-text table of the average RTT at each hop
pub fn generate_text_summary(destination: &str, averages: &[(u32, Option<f64>)]) -> String {
    let mut lines = Vec::with_capacity(averages.len() + 4);

    lines.push(format!("Average RTT by hop for {}:", destination));
    lines.push(format!("  {:>4}  {:>12}", "HOP", "AVG RTT (ms)"));
    lines.push(format!("  {}  {}", "-".repeat(4), "-".repeat(12)));

    for (hop, rtt) in averages {
        let value = rtt.map_or_else(|| "*".to_string(), |v| format!("{:.3}", v));
        lines.push(format!("  {:>4}  {:>12}", hop, value));
    }

    if averages.is_empty() {
        lines.push("  (no hops recorded)".to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(trace_num: u32, points: Vec<(u32, Option<f64>)>) -> TraceSeries {
        TraceSeries {
            trace_num,
            timestamp: "12:00:00".to_string(),
            points,
        }
    }

    #[test]
    fn test_generate_chart() {
        let data = vec![
            series(1, vec![(1, Some(1.2)), (2, Some(5.0)), (3, Some(9.4))]),
            series(2, vec![(1, Some(1.0)), (2, Some(4.0)), (3, Some(12.0))]),
        ];

        let svg = generate_chart(&data, None).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("Trace 1 (12:00:00)"));
        assert!(svg.contains("Trace 2 (12:00:00)"));
        assert!(svg.contains("Hop Number"));
    }

    #[test]
    fn test_timeout_breaks_line() {
        let data = vec![series(
            1,
            vec![(1, Some(1.0)), (2, Some(2.0)), (3, None), (4, Some(4.0)), (5, Some(5.0))],
        )];
        let svg = generate_chart(&data, None).unwrap();
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<circle cx").count(), 4 + 1);
    }

    #[test]
    fn test_empty_series() {
        assert!(matches!(generate_chart(&[], None), Err(ChartError::EmptySeries)));
        assert!(matches!(
            generate_chart(&[series(1, vec![])], None),
            Err(ChartError::EmptySeries)
        ));
    }

    #[test]
    fn test_no_samples() {
        let data = vec![series(1, vec![(1, None), (2, None)])];
        assert!(matches!(generate_chart(&data, None), Err(ChartError::NoSamples)));
    }

    #[test]
    fn test_title_is_escaped() {
        let config = ChartConfig::new().with_title("a <b> & c");
        let svg = generate_chart(&[series(1, vec![(1, Some(1.0))])], Some(&config)).unwrap();
        assert!(svg.contains("a &lt;b&gt; &amp; c"));
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(13.2), 20.0);
        assert_eq!(nice_ceiling(4.0), 5.0);
        assert_eq!(nice_ceiling(90.0), 100.0);
    }

    #[test]
    fn test_text_summary() {
        let text = generate_text_summary("example.com", &[(1, Some(1.5)), (2, None)]);
        assert!(text.contains("example.com"));
        assert!(text.contains("1.500"));
        assert!(text.lines().last().unwrap().trim().ends_with('*'));
    }
}
