//! Parser for the textual output of `traceroute`.
//!
//! The tool prints one header line followed by one line per hop:
//!
//! ```text
//! traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets
//!  1  192.168.1.1 (192.168.1.1)  1.123 ms  0.987 ms  1.045 ms
//!  2  router.example.com (10.0.0.1)  2.1 ms  * <1 ms
//!  3  * * *
//!  4  10.0.0.2  5.0 ms  4.9 ms  5.1 ms
//! ```
//!
//! There is no reliable delimiter structure, so each hop line is decomposed
//! by a small set of shape matchers. Lines that do not look like hop lines
//! are skipped; parsing never fails.

use super::hop::{HopRecord, RttSamples};
use crate::utils::config::{RTT_SLOTS, SUB_MILLISECOND_MARKER, SUB_MILLISECOND_RTT};
use log::{debug, trace};

/// Address and name recovered from a hop line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Endpoint {
    address: Option<String>,
    hostname: Option<String>,
}

/// A shape matcher either claims the line or passes
type ShapeMatcher = fn(&str) -> Option<Endpoint>;

/// Tried in order, first match wins
const ENDPOINT_MATCHERS: &[(&str, ShapeMatcher)] = &[
    ("named pair", match_named_pair),
    ("address only", match_address_only),
    ("bare address", match_bare_address),
];

/// One probe column found on a hop line
#[derive(Debug, Clone, Copy, PartialEq)]
enum ProbeToken {
    /// `12.3 ms`
    Rtt(f64),
    /// `*`, or a timing that does not parse as a number
    Timeout,
    /// `<1 ms`, resolved once the whole line has been seen
    SubMillisecond,
}

/// Parse a complete traceroute transcript into hop records
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw_output` - Captured stdout of one traceroute run, header included
///
/// # Returns
/// One record per hop line, in the order they appear. Empty input (a failed
/// run) yields an empty vector.
pub fn parse_traceroute(raw_output: &str) -> Vec<HopRecord> {
    let hops: Vec<HopRecord> = raw_output
        .trim()
        .lines()
        .skip(1)
        .filter_map(|line| {
            let record = parse_hop_line(line);
            if record.is_none() {
                trace!("Skipping non-hop line: {:?}", line);
            }
            record
        })
        .collect();

    debug!("Parsed {} hops from traceroute output", hops.len());

    hops
}

/// Parse a single hop line
///
/// **Public** - useful for streaming callers that already split lines
///
/// Returns `None` when the line does not start with a hop number.
pub fn parse_hop_line(line: &str) -> Option<HopRecord> {
    let (hop_number, remainder) = split_hop_number(line)?;

    if remainder.trim() == "* * *" {
        return Some(HopRecord::timed_out(hop_number));
    }

    let endpoint = resolve_endpoint(remainder);
    let rtt_samples = extract_rtt_samples(remainder);

    Some(HopRecord::new(
        hop_number,
        endpoint.address,
        endpoint.hostname,
        rtt_samples,
    ))
}

/// Split `"  3  rest..."` into `(3, "rest...")`
///
/// **Private** - the digits must be followed by whitespace
fn split_hop_number(line: &str) -> Option<(u32, &str)> {
    let rest = line.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let (digits, after) = rest.split_at(digits_end);
    let remainder = after.trim_start();
    if remainder.len() == after.len() {
        return None;
    }

    // Absurdly long hop numbers are noise, not hops
    let hop_number = digits.parse().ok()?;

    Some((hop_number, remainder))
}

/// Run the shape matchers in priority order
///
/// **Private** - internal helper for parse_hop_line
fn resolve_endpoint(remainder: &str) -> Endpoint {
    ENDPOINT_MATCHERS
        .iter()
        .find_map(|(shape, matcher)| {
            let endpoint = matcher(remainder)?;
            trace!("Matched {} shape: {:?}", shape, endpoint);
            Some(endpoint)
        })
        .unwrap_or_default()
}

/// `name (address)`: the first name token directly followed by a group
fn match_named_pair(remainder: &str) -> Option<Endpoint> {
    name_tokens(remainder).find_map(|(token, end)| {
        let after = &remainder[end..];
        let open = end + (after.len() - after.trim_start().len());
        let address = parenthesized_at(remainder, open)?;

        // A probe star glued to the name is not part of it
        let hostname = match token.strip_prefix('*') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => token,
        };

        Some(Endpoint {
            address: Some(address.to_string()),
            hostname: Some(hostname.to_string()),
        })
    })
}

/// `(address)` with no usable name in front of it
fn match_address_only(remainder: &str) -> Option<Endpoint> {
    let address = remainder
        .char_indices()
        .filter(|&(_, c)| c == '(')
        .find_map(|(open, _)| parenthesized_at(remainder, open))?;

    // Tentative; collapses later if it repeats the address or is a star
    let hostname = name_tokens(remainder)
        .next()
        .filter(|&(token, end)| {
            remainder[..end].trim_start().len() == token.len()
                && remainder[end..].trim_start().starts_with('(')
        })
        .map(|(token, _)| token.to_string());

    Some(Endpoint {
        address: Some(address.to_string()),
        hostname,
    })
}

/// No parentheses: the first token once probe stars are removed
fn match_bare_address(remainder: &str) -> Option<Endpoint> {
    let without_stars = strip_stars(remainder);
    let address = without_stars.split_whitespace().next()?;

    Some(Endpoint {
        address: Some(address.to_string()),
        hostname: None,
    })
}

/// Maximal runs of characters that are neither whitespace nor `(`,
/// yielded with the byte offset just past each run
fn name_tokens(text: &str) -> impl Iterator<Item = (&str, usize)> + '_ {
    text.split(|c: char| c.is_whitespace() || c == '(')
        .filter(|token| !token.is_empty())
        .map(move |token| {
            let start = token.as_ptr() as usize - text.as_ptr() as usize;
            (token, start + token.len())
        })
}

/// Content of a non-empty `( ... )` group opening at byte `open`
fn parenthesized_at(text: &str, open: usize) -> Option<&str> {
    let inner = text.get(open..)?.strip_prefix('(')?;
    match inner.find(')')? {
        0 => None,
        close => Some(&inner[..close]),
    }
}

/// Remove every `*` together with the whitespace around it
fn strip_stars(text: &str) -> String {
    let pieces: Vec<&str> = text.split('*').collect();
    let last = pieces.len() - 1;

    pieces
        .iter()
        .enumerate()
        .map(|(i, piece)| {
            let piece = if i > 0 { piece.trim_start() } else { piece };
            if i < last {
                piece.trim_end()
            } else {
                piece
            }
        })
        .collect()
}

/// Build the fixed-width sample array for one hop line
///
/// **Private** - pads with timeouts and drops columns beyond the third
fn extract_rtt_samples(remainder: &str) -> RttSamples {
    let sub_millisecond = remainder.contains(SUB_MILLISECOND_MARKER);
    let mut samples: RttSamples = [None; RTT_SLOTS];

    for (slot, token) in samples.iter_mut().zip(scan_probe_tokens(remainder)) {
        *slot = match token {
            ProbeToken::Rtt(value) => Some(value),
            ProbeToken::Timeout => None,
            ProbeToken::SubMillisecond => sub_millisecond.then_some(SUB_MILLISECOND_RTT),
        };
    }

    samples
}

/// Scan left to right for probe columns
///
/// **Private** - internal tokenizer
fn scan_probe_tokens(text: &str) -> Vec<ProbeToken> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                tokens.push(ProbeToken::Timeout);
                i = ms_suffix(bytes, i + 1).unwrap_or(i + 1);
            }
            b'<' => match timing_end(bytes, i + 1) {
                Some(end) => {
                    tokens.push(ProbeToken::SubMillisecond);
                    i = end;
                }
                None => i += 1,
            },
            b if is_number_byte(b) => {
                let run_end = number_run_end(bytes, i);
                match ms_suffix(bytes, run_end) {
                    Some(end) => {
                        let value = text[i..run_end].parse::<f64>();
                        tokens.push(value.map_or(ProbeToken::Timeout, ProbeToken::Rtt));
                        i = end;
                    }
                    // Every suffix of the run ends at the same place
                    None => i = run_end,
                }
            }
            _ => i += 1,
        }
    }

    tokens
}

/// End offset of a `12.3 ms` timing starting exactly at `start`
fn timing_end(bytes: &[u8], start: usize) -> Option<usize> {
    if !bytes.get(start).copied().is_some_and(is_number_byte) {
        return None;
    }
    ms_suffix(bytes, number_run_end(bytes, start))
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

fn number_run_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| !is_number_byte(b))
        .map_or(bytes.len(), |offset| start + offset)
}

/// Optional whitespace then `ms`; returns the offset past the unit
fn ms_suffix(bytes: &[u8], start: usize) -> Option<usize> {
    let unit = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map_or(bytes.len(), |offset| start + offset);

    bytes[unit..].starts_with(b"ms").then_some(unit + 2)
}
