//! Hop record produced by the traceroute parser.

use crate::utils::config::RTT_SLOTS;
use serde::{Deserialize, Serialize};

/// Fixed-width RTT samples in probe order (`None` = probe timed out)
pub type RttSamples = [Option<f64>; RTT_SLOTS];

/// One hop line of a traceroute transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopRecord {
    /// 1-based distance from the source, as printed by the tool
    pub hop_number: u32,

    /// Responding address, if any probe recorded one
    pub ip_address: Option<String>,

    /// Reverse name, only when distinct from the address
    pub hostname: Option<String>,

    /// Round-trip times in milliseconds
    pub rtt_samples: RttSamples,
}

impl HopRecord {
    /// Record for a `* * *` line
    pub fn timed_out(hop_number: u32) -> Self {
        Self {
            hop_number,
            ip_address: None,
            hostname: None,
            rtt_samples: [None; RTT_SLOTS],
        }
    }

    /// Build a record, dropping a hostname that is `*` or repeats the address
    pub fn new(
        hop_number: u32,
        ip_address: Option<String>,
        hostname: Option<String>,
        rtt_samples: RttSamples,
    ) -> Self {
        let hostname = hostname.filter(|name| name != "*" && Some(name) != ip_address.as_ref());

        Self {
            hop_number,
            ip_address,
            hostname,
            rtt_samples,
        }
    }

    /// Number of probes that produced a timing
    pub fn received(&self) -> usize {
        self.rtt_samples.iter().filter(|s| s.is_some()).count()
    }

    /// True when no probe at this hop answered
    pub fn is_timeout(&self) -> bool {
        self.received() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_equal_to_address_collapses() {
        let record = HopRecord::new(
            1,
            Some("192.168.1.1".to_string()),
            Some("192.168.1.1".to_string()),
            [Some(1.0), None, None],
        );
        assert!(record.hostname.is_none());
        assert_eq!(record.ip_address.as_deref(), Some("192.168.1.1"));
    }

    #[test]
    fn test_star_hostname_collapses() {
        let record = HopRecord::new(2, Some("10.0.0.1".to_string()), Some("*".to_string()), [None; 3]);
        assert!(record.hostname.is_none());
    }

    #[test]
    fn test_timed_out() {
        let record = HopRecord::timed_out(7);
        assert_eq!(record.hop_number, 7);
        assert!(record.is_timeout());
        assert_eq!(record.received(), 0);
    }

    #[test]
    fn test_serializes_missing_samples_as_null() {
        let record = HopRecord::new(3, None, None, [Some(2.5), None, None]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["rtt_samples"], serde_json::json!([2.5, null, null]));
        assert!(json["hostname"].is_null());
    }
}
