// src/checker/direct.rs
// =============================================================================
// The direct prober: one unassisted HTTP request to the target URL.
//
// Key behavior:
// - Single GET with a browser User-Agent and a short timeout
// - Active means the final response status is in the 200-399 range
// - Any transport failure (timeout, DNS, refused connection, TLS) is simply
//   "not active", with the error text kept as the detail
// - No retries; the fallback tier handles everything else
// =============================================================================

use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// User-Agent sent on every outbound request.
///
/// Some hosts answer differently (or not at all) to clients that do not
/// present a browser-like agent string.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// What a single direct probe found out about a URL.
#[derive(Debug, Clone, Serialize)]
pub struct DirectProbe {
    /// true when the response status was in [200, 400)
    pub active: bool,
    /// "HTTP <code>" for a response, or the transport error text
    pub detail: String,
}

/// Probes a URL directly.
///
/// Redirects are followed; the status examined is the final one. A URL that
/// does not even parse shows up here as a failed request, which is fine:
/// the caller only cares about active/not-active plus a human-readable
/// detail line.
pub async fn probe(client: &Client, url: &str, timeout: Duration) -> DirectProbe {
    let result = client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .timeout(timeout)
        .send()
        .await;

    match result {
        Ok(response) => {
            let code = response.status().as_u16();
            DirectProbe {
                active: (200..400).contains(&code),
                detail: format!("HTTP {}", code),
            }
        }
        Err(e) => DirectProbe {
            active: false,
            detail: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{serve, CannedResponse};

    #[tokio::test]
    async fn test_probe_ok_status_is_active() {
        let server = serve(vec![CannedResponse::status(200)]).await;
        let client = Client::new();
        let result = probe(&client, &server.base_url, Duration::from_secs(5)).await;
        assert!(result.active);
        assert_eq!(result.detail, "HTTP 200");
    }

    #[tokio::test]
    async fn test_probe_client_error_is_inactive() {
        let server = serve(vec![CannedResponse::status(404)]).await;
        let client = Client::new();
        let result = probe(&client, &server.base_url, Duration::from_secs(5)).await;
        assert!(!result.active);
        assert_eq!(result.detail, "HTTP 404");
    }

    #[tokio::test]
    async fn test_probe_server_error_is_inactive() {
        let server = serve(vec![CannedResponse::status(500)]).await;
        let client = Client::new();
        let result = probe(&client, &server.base_url, Duration::from_secs(5)).await;
        assert!(!result.active);
        assert_eq!(result.detail, "HTTP 500");
    }

    #[tokio::test]
    async fn test_probe_connection_failure_keeps_error_text() {
        // Nothing listens on port 1; the probe should fail fast with a
        // transport error rather than a status line
        let client = Client::new();
        let result = probe(&client, "http://127.0.0.1:1/", Duration::from_secs(5)).await;
        assert!(!result.active);
        assert!(!result.detail.starts_with("HTTP "));
        assert!(!result.detail.is_empty());
    }
}
