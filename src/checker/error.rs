// src/checker/error.rs
// =============================================================================
// Every way a check can fail, as one typed error enum.
//
// The checker functions return Result<_, CheckError> instead of panicking or
// hiding failures behind a catch-all. The orchestrator turns any of these
// into a terminal outcome for that one URL; the batch keeps going.
// =============================================================================

use thiserror::Error;

/// Failures raised by the remote-check submitter and poller.
///
/// Transport covers timeouts, DNS failures, refused connections and TLS
/// errors surfaced by reqwest. The remaining variants are protocol and
/// parse failures specific to the check network's API.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The HTTP request itself failed (timeout, DNS, connection, TLS)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API base or a derived endpoint URL did not parse
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Challenge page received but no csrf token could be found in it
    #[error("could not extract a csrf token from the challenge page")]
    TokenNotFound,

    /// Still HTML after resubmitting with the csrf token
    #[error("expected JSON but received HTML again after csrf token submission")]
    HtmlAfterToken,

    /// Submission response parsed as JSON but carried no request_id
    #[error("submission response did not contain a request_id")]
    MissingRequestId,

    /// A non-empty poll or submission body was not valid JSON
    #[error("invalid JSON in response: {0}")]
    InvalidJson(String),

    /// Poll body was valid, truthy JSON but not a per-node result mapping
    #[error("poll response was not a per-node result mapping")]
    UnexpectedPayload,

    /// Every poll attempt came back empty
    #[error("no result after {0} poll attempts")]
    PollTimedOut(u32),
}
