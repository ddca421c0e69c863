//! Explorer integration subsystem.
//!
//! # Data Flow
//! ```text
//! caller awaits an accessor on Transaction / Wallet
//!     → cached? return it
//!     → client.rs (endpoint URL, envelope unwrapping)
//!     → fetch.rs (GET with retries, JSON parse)
//!     → entity stores the parsed fields for good
//! Wallet::transactions_range
//!     → range.rs (filters the cached list, no I/O)
//! ```
//!
//! # Constraints
//! - Every field is fetched at most once per entity
//! - Addresses and hashes are stored lower-cased
//! - The API key is never logged

pub mod client;
pub mod fetch;
pub mod range;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{ExplorerClient, DEFAULT_END_BLOCK, TXLIST_RESULT_CAP};
pub use fetch::Fetcher;
pub use range::{Direction, RangeFilter, TransactionRange};
pub use transaction::{Transaction, TransactionFields};
pub use types::{ExplorerError, ExplorerResult};
pub use wallet::Wallet;
