// src/config.rs
// =============================================================================
// Runtime configuration for the checking pipeline.
//
// Every timing and endpoint constant lives here instead of being scattered
// through the checker as literals. The defaults reproduce the reference
// behavior of the check network:
// - 5 second direct probe timeout
// - 10 second timeout per check-network request
// - 10 poll attempts, 2 seconds apart
// - India excluded from remote classification
// =============================================================================

use std::time::Duration;

/// Knobs for one batch of URL checks.
///
/// Built from CLI flags in main; `Default` gives the reference values.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Base URL of the distributed check API
    pub api_base: String,
    /// Timeout for the direct probe request
    pub direct_timeout: Duration,
    /// Timeout for each submission/poll request to the check network
    pub request_timeout: Duration,
    /// How many times to poll for a result before giving up
    pub poll_attempts: u32,
    /// How long to wait before each poll attempt
    pub poll_interval: Duration,
    /// Country whose nodes are ignored when classifying remote results
    pub excluded_country: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            api_base: "https://check-host.net".to_string(),
            direct_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            poll_attempts: 10,
            poll_interval: Duration::from_secs(2),
            excluded_country: "India".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let config = CheckerConfig::default();
        assert_eq!(config.api_base, "https://check-host.net");
        assert_eq!(config.direct_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.poll_attempts, 10);
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.excluded_country, "India");
    }
}
