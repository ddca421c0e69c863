//! Lazily-populated transaction and wallet views over an Etherscan-style
//! explorer API.
//!
//! ```no_run
//! use txscope::{ExplorerClient, RangeFilter};
//!
//! # async fn run() -> Result<(), txscope::ExplorerError> {
//! let client = ExplorerClient::with_base_url("https://api.etherscan.io/api")?;
//! let wallet = client.wallet("0xdD5e52c3f4075153159743D30Fba75f3A0a1424a");
//!
//! println!("balance: {} wei", wallet.balance().await?);
//! for tx in wallet.transactions_range(RangeFilter::new().after(7_363_716).direction("OUT")).await? {
//!     println!("{} -> {:?}", tx.hash(), tx.cached_recipient());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod explorer;
pub mod observability;
pub mod resilience;

pub use alloy::primitives::U256;
pub use config::ExplorerConfig;
pub use explorer::{
    Direction, ExplorerClient, ExplorerError, ExplorerResult, RangeFilter, Transaction, Wallet,
};
