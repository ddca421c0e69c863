//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! explorer::fetch and the entities produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (request/retry/skip counters via `metrics`)
//! ```
//!
//! # Design Decisions
//! - Structured fields (status, url, attempt) rather than formatted strings
//! - Metrics are no-ops until the host application installs a recorder

pub mod logging;
pub mod metrics;
