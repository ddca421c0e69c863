//! Lazily-populated wallet view.
//!
//! # Population
//! - The transaction list is fetched once, in a single unpaginated call, and
//!   kept sorted by timestamp
//! - The balance is fetched once and kept as returned
//! - Range queries re-filter the cached list and never refetch

use alloy::primitives::U256;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::explorer::client::{ExplorerClient, TXLIST_RESULT_CAP};
use crate::explorer::range::{RangeFilter, TransactionRange};
use crate::explorer::transaction::{Transaction, TransactionFields};
use crate::explorer::types::{
    lookup_nullable_str, lookup_str, normalize_hex_id, parse_quantity, ExplorerError,
    ExplorerResult,
};

/// An address and its cached on-chain history.
pub struct Wallet {
    client: ExplorerClient,
    address: String,
    transactions: OnceCell<Vec<Transaction>>,
    balance: OnceCell<U256>,
}

impl Wallet {
    pub fn new(client: ExplorerClient, address: &str) -> Self {
        Self {
            client,
            address: normalize_hex_id(address),
            transactions: OnceCell::new(),
            balance: OnceCell::new(),
        }
    }

    /// Lower-cased address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Every transaction touching this wallet, oldest first.
    ///
    /// Wallets with more than [`TXLIST_RESULT_CAP`] transactions are
    /// truncated by the provider.
    pub async fn transactions(&self) -> ExplorerResult<&[Transaction]> {
        self.transactions
            .get_or_try_init(|| self.fetch_transactions())
            .await
            .map(Vec::as_slice)
    }

    /// Current balance in wei.
    pub async fn balance(&self) -> ExplorerResult<U256> {
        self.balance
            .get_or_try_init(|| async move {
                tracing::debug!(address = %self.address, "Fetching balance");
                let result = self.client.balance(&self.address).await?;
                let raw = result
                    .as_str()
                    .ok_or_else(|| ExplorerError::MissingField("result".to_string()))?;
                parse_quantity("balance", raw)
            })
            .await
            .copied()
    }

    /// Transactions with `after < block < before` in the given direction.
    ///
    /// Fetches the transaction list on first use. The returned iterator is
    /// lazy; calling this again starts a fresh pass over the cached list.
    pub async fn transactions_range(&self, filter: RangeFilter) -> ExplorerResult<TransactionRange<'_>> {
        let transactions = self.transactions().await?;
        Ok(TransactionRange::new(transactions, &self.address, filter))
    }

    async fn fetch_transactions(&self) -> ExplorerResult<Vec<Transaction>> {
        tracing::debug!(address = %self.address, "Fetching transaction list");
        let result = self.client.transaction_list(&self.address).await?;
        let entries = result
            .as_array()
            .ok_or_else(|| ExplorerError::MissingField("result[]".to_string()))?;

        if entries.len() >= TXLIST_RESULT_CAP {
            tracing::warn!(
                address = %self.address,
                entries = entries.len(),
                "Transaction list reached the provider cap and may be truncated"
            );
        }

        let mut transactions = entries
            .iter()
            .map(|entry| self.transaction_from_entry(entry))
            .collect::<ExplorerResult<Vec<_>>>()?;
        transactions.sort_by_key(Transaction::cached_timestamp);

        tracing::debug!(
            address = %self.address,
            count = transactions.len(),
            "Transaction list cached"
        );
        Ok(transactions)
    }

    fn transaction_from_entry(&self, entry: &Value) -> ExplorerResult<Transaction> {
        const CONTEXT: &str = "result[]";
        let fields = TransactionFields {
            sender: Some(lookup_str(entry, "from", CONTEXT)?.to_string()),
            recipient: Some(
                lookup_nullable_str(entry, "to", CONTEXT)?
                    .unwrap_or_default()
                    .to_string(),
            ),
            value: Some(lookup_str(entry, "value", CONTEXT)?.to_string()),
            timestamp: Some(lookup_str(entry, "timeStamp", CONTEXT)?.to_string()),
            block: Some(lookup_str(entry, "blockNumber", CONTEXT)?.to_string()),
        };
        let hash = lookup_str(entry, "hash", CONTEXT)?;
        Transaction::with_fields(self.client.clone(), hash, fields)
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("transactions", &self.transactions.get().map(Vec::len))
            .field("balance", &self.balance.get())
            .finish()
    }
}
