// src/checker/pipeline.rs
// =============================================================================
// The orchestrator: runs the two-tier check for each URL and produces
// exactly one outcome per URL.
//
// Flow per URL:
// 1. Direct probe. Active -> done, no remote traffic at all.
// 2. Submit to the check network, poll for the per-node results.
// 3. Classify the nodes, map them to countries, drop the excluded country.
//
// URLs are processed strictly sequentially, in input order. A failed check
// terminates only that URL's outcome; the batch keeps going. The HTTP client
// is created once per batch and dropped when the batch ends.
// =============================================================================

use reqwest::Client;
use serde::Serialize;
use tracing::warn;

use crate::checker::classify::classify;
use crate::checker::country::country_for_node;
use crate::checker::direct::probe;
use crate::checker::remote::{poll, submit};
use crate::config::CheckerConfig;

/// Final classification for one URL.
///
/// Serialized with an internal `status` tag; the variants carrying data are
/// struct variants because internally tagged newtype variants around
/// sequences do not serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The direct probe answered with a 2xx/3xx status
    ActiveDirect,
    /// Check-network nodes outside the excluded country reached the URL
    ActiveRemote { countries: Vec<String> },
    /// Active nodes existed, but every one mapped to the excluded country
    ExcludedOnly,
    /// The check network produced results but no node reached the URL
    NoActiveNodes,
    /// Submission or polling failed; the message says how
    CheckFailed { message: String },
}

impl CheckOutcome {
    /// Human-readable status label used in the table and the CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            CheckOutcome::ActiveDirect => "Active (Direct)",
            CheckOutcome::ActiveRemote { .. } => "Active (Other Countries)",
            CheckOutcome::ExcludedOnly => "Inactive (Excluded Country Only)",
            CheckOutcome::NoActiveNodes => "Inactive (No Active Nodes)",
            CheckOutcome::CheckFailed { .. } => "Error Retrieving API Data",
        }
    }

    /// Comma-joined country list for the table and the CSV export;
    /// empty for every outcome except ActiveRemote.
    pub fn countries_joined(&self) -> String {
        match self {
            CheckOutcome::ActiveRemote { countries } => countries.join(", "),
            _ => String::new(),
        }
    }

    /// Reachable means some tier saw the URL answer
    pub fn is_reachable(&self) -> bool {
        matches!(
            self,
            CheckOutcome::ActiveDirect | CheckOutcome::ActiveRemote { .. }
        )
    }
}

/// One row of the final report: the URL, its outcome, and an optional
/// detail line (the direct probe's status text).
#[derive(Debug, Clone, Serialize)]
pub struct UrlReport {
    pub url: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Checks a batch of URLs sequentially, one report per URL, in input order.
pub async fn check_urls(urls: &[String], config: &CheckerConfig) -> Vec<UrlReport> {
    // One client (connection pool) per batch run
    let client = Client::builder()
        .build()
        .expect("Failed to create HTTP client");

    let mut reports = Vec::with_capacity(urls.len());
    for url in urls {
        println!("🔍 Checking: {}", url);
        reports.push(check_url(&client, url, config).await);
    }
    reports
}

/// Runs the full two-tier check for a single URL.
pub async fn check_url(client: &Client, url: &str, config: &CheckerConfig) -> UrlReport {
    // Tier one: the direct probe
    let direct = probe(client, url, config.direct_timeout).await;
    if direct.active {
        println!("   ✅ Direct check succeeded ({})", direct.detail);
        return UrlReport {
            url: url.to_string(),
            outcome: CheckOutcome::ActiveDirect,
            detail: Some(direct.detail),
        };
    }

    println!("   ❌ Direct check failed: {}", direct.detail);
    println!("   🌐 Falling back to the check network...");

    // Tier two: submit, then poll
    let poll_result = match submit(client, url, config).await {
        Ok(ticket) => poll(client, &ticket, config).await,
        Err(e) => Err(e),
    };

    let results = match poll_result {
        Ok(results) => results,
        Err(e) => {
            warn!("check failed for {}: {}", url, e);
            println!("   ⚠️  {}", e);
            return UrlReport {
                url: url.to_string(),
                outcome: CheckOutcome::CheckFailed {
                    message: e.to_string(),
                },
                detail: Some(direct.detail),
            };
        }
    };

    let active_nodes = classify(&results);
    if active_nodes.is_empty() {
        println!("   ❌ No active nodes found via the check network");
        return UrlReport {
            url: url.to_string(),
            outcome: CheckOutcome::NoActiveNodes,
            detail: Some(direct.detail),
        };
    }

    // Map node ids to countries, then drop the excluded country.
    // The exclusion applies only here, never to the direct probe.
    let countries: Vec<String> = active_nodes
        .iter()
        .map(|node_id| country_for_node(node_id))
        .filter(|country| *country != config.excluded_country)
        .collect();

    if countries.is_empty() {
        println!("   ❌ Only nodes from {} responded; ignoring them", config.excluded_country);
        return UrlReport {
            url: url.to_string(),
            outcome: CheckOutcome::ExcludedOnly,
            detail: Some(direct.detail),
        };
    }

    println!("   ✅ Active from: {}", countries.join(", "));
    UrlReport {
        url: url.to_string(),
        outcome: CheckOutcome::ActiveRemote { countries },
        detail: Some(direct.detail),
    }
}
