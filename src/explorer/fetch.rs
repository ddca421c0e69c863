//! HTTP GET with retries, returning parsed JSON.
//!
//! # Behavior
//! - Every attempt is preceded by the policy's courtesy delay
//! - A non-200 answer that is not the last attempt is logged and retried
//! - When attempts run out, a skip is logged and the last body is parsed
//!   anyway; only an invalid body turns into an error
//! - Transport failures are not answers and are returned immediately
//!
//! Nothing is cached here: every call performs network I/O.

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::explorer::types::{ExplorerError, ExplorerResult};
use crate::observability::metrics;
use crate::resilience::{RetryOutcome, RetryPolicy};

/// Query parameter that must never reach the logs.
const API_KEY_PARAM: &str = "apikey";

/// JSON fetcher over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: reqwest::Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(http: reqwest::Client, policy: RetryPolicy) -> Self {
        Self { http, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET `url` and parse the body as JSON.
    pub async fn fetch_json(&self, url: &Url) -> ExplorerResult<Value> {
        let shown = redact_url(url);
        let http = &self.http;

        let outcome = self
            .policy
            .run(
                move |_| async move {
                    let response = http
                        .get(url.clone())
                        .send()
                        .await
                        .map_err(|e| ExplorerError::Transport(e.without_url().to_string()))?;
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .map_err(|e| ExplorerError::Transport(e.without_url().to_string()))?;
                    metrics::record_request(status.as_u16());
                    Ok::<_, ExplorerError>((status, body))
                },
                |answer: &(StatusCode, String)| answer.0 == StatusCode::OK,
                |answer: &(StatusCode, String), attempt: u32| {
                    tracing::warn!(
                        status = answer.0.as_u16(),
                        url = %shown,
                        attempt = attempt,
                        "Provider request failed, retrying"
                    );
                    metrics::record_retry();
                },
            )
            .await?;

        let body = match outcome {
            RetryOutcome::Success { value: (_, body), attempts } => {
                tracing::debug!(url = %shown, attempts = attempts, "Provider request succeeded");
                body
            }
            RetryOutcome::Exhausted {
                last: (status, body),
                attempts,
            } => {
                tracing::warn!(
                    status = status.as_u16(),
                    url = %shown,
                    attempts = attempts,
                    "Skip: provider never returned 200, parsing last body"
                );
                metrics::record_skip();
                body
            }
        };

        Ok(serde_json::from_str(&body)?)
    }
}

/// Render a URL for logging with the API key masked.
pub fn redact_url(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
