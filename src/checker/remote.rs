// src/checker/remote.rs
// =============================================================================
// Talks to the distributed check network: submit a check, then poll for the
// per-node results.
//
// Submission quirk: the API sometimes answers with an HTML challenge page
// instead of JSON. The page embeds a csrf token; resubmitting the same
// request once with that token appended gets the real JSON answer. That one
// retry is the only adaptive behavior in the whole tool — at most two
// submission requests, never more.
//
// Polling is a fixed-count, fixed-interval loop. An empty body means "not
// ready yet"; a body that fails to parse aborts the check; a non-empty JSON
// object is the result.
// =============================================================================

use regex::Regex;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::checker::classify::json_is_truthy;
use crate::checker::direct::BROWSER_USER_AGENT;
use crate::checker::error::CheckError;
use crate::config::CheckerConfig;

// The API serves JSON when asked nicely, HTML challenge pages otherwise
const ACCEPT_JSON_OR_HTML: &str = "application/json, text/html;q=0.9";

/// Submits a URL to the check network.
///
/// Returns the opaque ticket (`request_id`) identifying the pending check.
/// Handles the HTML-challenge path: extract the csrf token with a fixed
/// pattern scan and resubmit exactly once.
pub async fn submit(
    client: &Client,
    target: &str,
    config: &CheckerConfig,
) -> Result<String, CheckError> {
    let endpoint = submission_endpoint(&config.api_base, target, None)?;
    let mut body = fetch_text(client, endpoint, config).await?;

    if !looks_like_json(&body) {
        // Challenge page: pull the token out and resubmit once with it
        let token = extract_csrf_token(&body).ok_or(CheckError::TokenNotFound)?;
        debug!("challenge page received, resubmitting once with csrf token");

        let endpoint = submission_endpoint(&config.api_base, target, Some(&token))?;
        body = fetch_text(client, endpoint, config).await?;
        if !looks_like_json(&body) {
            return Err(CheckError::HtmlAfterToken);
        }
    }

    let value: Value =
        serde_json::from_str(&body).map_err(|e| CheckError::InvalidJson(e.to_string()))?;
    ticket_from(&value).ok_or(CheckError::MissingRequestId)
}

/// Polls the check network for the result of a submitted check.
///
/// Each attempt sleeps the configured interval first, then fetches the
/// result endpoint. Empty and falsy-JSON bodies keep the loop going; a
/// non-empty JSON object is returned immediately; anything unparseable or
/// truthy-but-not-a-mapping aborts. Exhausting every attempt is a timeout.
pub async fn poll(
    client: &Client,
    ticket: &str,
    config: &CheckerConfig,
) -> Result<Map<String, Value>, CheckError> {
    let endpoint = Url::parse(&config.api_base)?.join(&format!("check-result/{}", ticket))?;

    for attempt in 1..=config.poll_attempts {
        tokio::time::sleep(config.poll_interval).await;
        debug!("poll attempt {}/{} for ticket {}", attempt, config.poll_attempts, ticket);

        let body = fetch_text(client, endpoint.clone(), config).await?;
        if body.trim().is_empty() {
            // Not ready yet
            continue;
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| CheckError::InvalidJson(e.to_string()))?;
        if !json_is_truthy(&value) {
            // Parsed, but still no content (null, {}, [], ...)
            continue;
        }

        return match value {
            Value::Object(map) => Ok(map),
            _ => Err(CheckError::UnexpectedPayload),
        };
    }

    Err(CheckError::PollTimedOut(config.poll_attempts))
}

// Builds the submission endpoint, optionally carrying the csrf token
fn submission_endpoint(
    api_base: &str,
    target: &str,
    token: Option<&str>,
) -> Result<Url, CheckError> {
    let mut endpoint = Url::parse(api_base)?.join("check-http")?;
    endpoint.query_pairs_mut().append_pair("host", target);
    if let Some(token) = token {
        endpoint.query_pairs_mut().append_pair("csrf_token", token);
    }
    Ok(endpoint)
}

// One GET against the check network with the shared headers and timeout
async fn fetch_text(
    client: &Client,
    endpoint: Url,
    config: &CheckerConfig,
) -> Result<String, CheckError> {
    let response = client
        .get(endpoint)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .header(ACCEPT, ACCEPT_JSON_OR_HTML)
        .timeout(config.request_timeout)
        .send()
        .await?;
    Ok(response.text().await?)
}

// A JSON answer starts with '{'; anything else is treated as a challenge page
fn looks_like_json(body: &str) -> bool {
    body.trim_start().starts_with('{')
}

/// Scans a challenge page for the csrf token.
///
/// Fixed pattern by design: the page embeds
/// `name="csrf_token" value="<token>"` and nothing about the surrounding
/// markup is relied upon.
fn extract_csrf_token(html: &str) -> Option<String> {
    let pattern =
        Regex::new(r#"name="csrf_token" value="(.+?)""#).expect("csrf token pattern is valid");
    pattern.captures(html).map(|caps| caps[1].to_string())
}

// The ticket is opaque; accept a string or a bare number
fn ticket_from(value: &Value) -> Option<String> {
    match value.get("request_id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
