//! Provider request metrics.
//!
//! # Metrics
//! - `explorer_requests_total` (counter): attempts by HTTP status
//! - `explorer_retries_total` (counter): non-200 answers followed by a retry
//! - `explorer_skipped_total` (counter): URLs that never returned 200

/// Record one completed HTTP attempt.
pub fn record_request(status: u16) {
    metrics::counter!("explorer_requests_total", "status" => status.to_string()).increment(1);
}

/// Record a retry after a non-200 answer.
pub fn record_retry() {
    metrics::counter!("explorer_retries_total").increment(1);
}

/// Record a URL given up on after the last attempt.
pub fn record_skip() {
    metrics::counter!("explorer_skipped_total").increment(1);
}
