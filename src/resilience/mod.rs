//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Provider request:
//!     → retries.rs (courtesy delay, attempt, fixed backoff on non-200)
//!     → timeout enforced by the reqwest client (provider.request_timeout_secs)
//! ```

pub mod retries;

pub use retries::{RetryOutcome, RetryPolicy};
