//! Lazily-populated transaction.
//!
//! # Population
//! - `sender`, `recipient`, `value` and `block` come from one combined
//!   "transaction by hash" request, made at most once
//! - `timestamp` comes from a separate "block reward" request keyed by the
//!   block number; the block is resolved first when unknown
//! - Fields supplied at construction are never re-fetched or overwritten
//!
//! Concurrent readers of an unpopulated field share a single request.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use crate::explorer::client::ExplorerClient;
use crate::explorer::types::{
    lookup_nullable_str, lookup_str, normalize_hex_id, normalize_recipient, parse_block,
    parse_quantity, parse_timestamp, ExplorerError, ExplorerResult,
};

/// Raw, provider-formatted fields known before any fetch.
///
/// `value` and `block` accept `0x` hex or decimal strings, `timestamp` is
/// decimal epoch seconds. `recipient: Some("")` records a contract creation.
#[derive(Debug, Clone, Default)]
pub struct TransactionFields {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub value: Option<String>,
    pub timestamp: Option<String>,
    pub block: Option<String>,
}

/// An on-chain transfer identified by its hash.
pub struct Transaction {
    client: ExplorerClient,
    hash: String,
    sender: OnceCell<String>,
    recipient: OnceCell<Option<String>>,
    value: OnceCell<U256>,
    block: OnceCell<u64>,
    timestamp: OnceCell<DateTime<Utc>>,
    details_fetched: OnceCell<()>,
}

impl Transaction {
    /// A transaction known only by hash; everything else is fetched on demand.
    pub fn new(client: ExplorerClient, hash: &str) -> Self {
        Self {
            client,
            hash: normalize_hex_id(hash),
            sender: OnceCell::new(),
            recipient: OnceCell::new(),
            value: OnceCell::new(),
            block: OnceCell::new(),
            timestamp: OnceCell::new(),
            details_fetched: OnceCell::new(),
        }
    }

    /// A transaction with some or all fields already known.
    ///
    /// Fails with [`ExplorerError::InvalidNumber`] if a numeric field does not parse.
    pub fn with_fields(
        client: ExplorerClient,
        hash: &str,
        fields: TransactionFields,
    ) -> ExplorerResult<Self> {
        let value = fields
            .value
            .as_deref()
            .map(|raw| parse_quantity("value", raw))
            .transpose()?;
        let block = fields.block.as_deref().map(parse_block).transpose()?;
        let timestamp = fields.timestamp.as_deref().map(parse_timestamp).transpose()?;

        Ok(Self {
            client,
            hash: normalize_hex_id(hash),
            sender: OnceCell::new_with(fields.sender.as_deref().map(normalize_hex_id)),
            recipient: OnceCell::new_with(
                fields
                    .recipient
                    .as_deref()
                    .map(|raw| normalize_recipient(Some(raw))),
            ),
            value: OnceCell::new_with(value),
            block: OnceCell::new_with(block),
            timestamp: OnceCell::new_with(timestamp),
            details_fetched: OnceCell::new(),
        })
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub async fn sender(&self) -> ExplorerResult<&str> {
        if self.sender.get().is_none() {
            self.populate().await?;
        }
        self.sender
            .get()
            .map(String::as_str)
            .ok_or_else(|| ExplorerError::MissingField("result.from".to_string()))
    }

    /// `None` for contract creations.
    pub async fn recipient(&self) -> ExplorerResult<Option<&str>> {
        if self.recipient.get().is_none() {
            self.populate().await?;
        }
        self.recipient
            .get()
            .map(Option::as_deref)
            .ok_or_else(|| ExplorerError::MissingField("result.to".to_string()))
    }

    /// Transferred amount in wei.
    pub async fn value(&self) -> ExplorerResult<U256> {
        if self.value.get().is_none() {
            self.populate().await?;
        }
        self.value
            .get()
            .copied()
            .ok_or_else(|| ExplorerError::MissingField("result.value".to_string()))
    }

    pub async fn block(&self) -> ExplorerResult<u64> {
        if self.block.get().is_none() {
            self.populate().await?;
        }
        self.block
            .get()
            .copied()
            .ok_or_else(|| ExplorerError::MissingField("result.blockNumber".to_string()))
    }

    /// Time of the block that includes this transaction.
    pub async fn timestamp(&self) -> ExplorerResult<DateTime<Utc>> {
        self.timestamp
            .get_or_try_init(|| async move {
                let block = self.block().await?;
                tracing::debug!(hash = %self.hash, block = block, "Fetching block timestamp");
                let result = self.client.block_reward(block).await?;
                parse_timestamp(lookup_str(&result, "timeStamp", "result")?)
            })
            .await
            .copied()
    }

    pub fn cached_sender(&self) -> Option<&str> {
        self.sender.get().map(String::as_str)
    }

    /// `None` both while unknown and for contract creations.
    pub fn cached_recipient(&self) -> Option<&str> {
        self.recipient.get().and_then(Option::as_deref)
    }

    pub fn cached_value(&self) -> Option<U256> {
        self.value.get().copied()
    }

    pub fn cached_block(&self) -> Option<u64> {
        self.block.get().copied()
    }

    pub fn cached_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.get().copied()
    }

    /// Fetch the transaction once and fill every detail field still empty.
    ///
    /// Fields are stored in response order, so a failure part-way keeps the
    /// ones already stored. A failed fetch may be retried by a later read.
    async fn populate(&self) -> ExplorerResult<()> {
        self.details_fetched
            .get_or_try_init(|| async move {
                tracing::debug!(hash = %self.hash, "Fetching transaction details");
                let result = self.client.transaction_by_hash(&self.hash).await?;

                let sender = lookup_str(&result, "from", "result")?;
                let _ = self.sender.set(normalize_hex_id(sender));

                let recipient = lookup_nullable_str(&result, "to", "result")?;
                let _ = self.recipient.set(normalize_recipient(recipient));

                let value = parse_quantity("value", lookup_str(&result, "value", "result")?)?;
                let _ = self.value.set(value);

                let block = parse_block(lookup_str(&result, "blockNumber", "result")?)?;
                let _ = self.block.set(block);

                Ok::<_, ExplorerError>(())
            })
            .await
            .map(|_| ())
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("hash", &self.hash)
            .field("sender", &self.sender.get())
            .field("recipient", &self.recipient.get())
            .field("value", &self.value.get())
            .field("block", &self.block.get())
            .field("timestamp", &self.timestamp.get())
            .finish()
    }
}
