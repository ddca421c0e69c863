//! Explorer REST client.
//!
//! # Responsibilities
//! - Build endpoint URLs from the configured base URL and API key
//! - Fetch through the retrying [`Fetcher`]
//! - Unwrap the provider envelope and surface provider-level errors
//!
//! The client is cheap to clone; every entity holds one.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::schema::ExplorerConfig;
use crate::explorer::fetch::{redact_url, Fetcher};
use crate::explorer::transaction::Transaction;
use crate::explorer::types::{ExplorerError, ExplorerResult};
use crate::explorer::wallet::Wallet;
use crate::resilience::RetryPolicy;

/// Upper block bound used for the transaction list query and as the default
/// `before` of a range filter.
pub const DEFAULT_END_BLOCK: u64 = 99_999_999;

/// Maximum number of entries the provider returns from one list call.
pub const TXLIST_RESULT_CAP: usize = 10_000;

struct ClientInner {
    base_url: Url,
    api_key: Option<String>,
    fetcher: Fetcher,
}

/// Etherscan-style explorer client.
#[derive(Clone)]
pub struct ExplorerClient {
    inner: Arc<ClientInner>,
}

impl ExplorerClient {
    /// Create a client from configuration.
    pub fn new(config: &ExplorerConfig) -> ExplorerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.request_timeout_secs))
            .build()
            .map_err(|e| ExplorerError::Config(format!("HTTP client: {}", e)))?;
        Self::with_http_client(config, http)
    }

    /// Create a client that sends requests through an existing `reqwest::Client`.
    ///
    /// `config.provider.request_timeout_secs` is not applied; the given
    /// client's own settings win.
    pub fn with_http_client(config: &ExplorerConfig, http: reqwest::Client) -> ExplorerResult<Self> {
        let base_url: Url = config.provider.base_url.parse().map_err(|e| {
            ExplorerError::Config(format!(
                "Invalid base URL '{}': {}",
                config.provider.base_url, e
            ))
        })?;
        let policy = RetryPolicy::from_config(&config.retries);

        tracing::info!(
            base_url = %redact_url(&base_url),
            max_attempts = policy.max_attempts(),
            api_key = config.provider.api_key.is_some(),
            "Explorer client initialized"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                api_key: config.provider.api_key.clone(),
                fetcher: Fetcher::new(http, policy),
            }),
        })
    }

    /// Create a client with default settings against `base_url`.
    pub fn with_base_url(base_url: &str) -> ExplorerResult<Self> {
        let mut config = ExplorerConfig::default();
        config.provider.base_url = base_url.to_string();
        Self::new(&config)
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.inner.fetcher
    }

    /// A transaction known only by its hash.
    pub fn transaction(&self, hash: &str) -> Transaction {
        Transaction::new(self.clone(), hash)
    }

    pub fn wallet(&self, address: &str) -> Wallet {
        Wallet::new(self.clone(), address)
    }

    /// Build the URL for a query, appending the API key when configured.
    pub fn endpoint(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.inner.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.extend_pairs(params);
            if let Some(key) = &self.inner.api_key {
                query.append_pair("apikey", key);
            }
        }
        url
    }

    /// `module=proxy&action=eth_getTransactionByHash`: returns `result`.
    pub async fn transaction_by_hash(&self, hash: &str) -> ExplorerResult<Value> {
        let url = self.endpoint(&[
            ("module", "proxy"),
            ("action", "eth_getTransactionByHash"),
            ("txhash", hash),
        ]);
        self.query(&url).await
    }

    /// `module=block&action=getblockreward`: returns `result`.
    pub async fn block_reward(&self, block: u64) -> ExplorerResult<Value> {
        let block = block.to_string();
        let url = self.endpoint(&[
            ("module", "block"),
            ("action", "getblockreward"),
            ("blockno", &block),
        ]);
        self.query(&url).await
    }

    /// `module=account&action=txlist` over all blocks, ascending: returns `result`.
    ///
    /// Unpaginated, so at most [`TXLIST_RESULT_CAP`] entries come back.
    pub async fn transaction_list(&self, address: &str) -> ExplorerResult<Value> {
        let end_block = DEFAULT_END_BLOCK.to_string();
        let url = self.endpoint(&[
            ("module", "account"),
            ("action", "txlist"),
            ("address", address),
            ("startblock", "0"),
            ("endblock", &end_block),
            ("sort", "asc"),
        ]);
        self.query(&url).await
    }

    /// `module=account&action=balance` at the latest block: returns `result`.
    pub async fn balance(&self, address: &str) -> ExplorerResult<Value> {
        let url = self.endpoint(&[
            ("module", "account"),
            ("action", "balance"),
            ("address", address),
            ("tag", "latest"),
        ]);
        self.query(&url).await
    }

    async fn query(&self, url: &Url) -> ExplorerResult<Value> {
        let body = self.inner.fetcher.fetch_json(url).await?;
        unwrap_envelope(body)
    }
}

/// Extract `result` from a provider response.
///
/// Account and block answers carry `status: "0"` with a message string in
/// `result` on failure. An empty list also has status `"0"` but an array
/// `result`, so only string results are treated as errors. Proxy answers
/// follow JSON-RPC and report failures under `error`.
fn unwrap_envelope(mut body: Value) -> ExplorerResult<Value> {
    if body.get("status").and_then(Value::as_str) == Some("0") {
        if let Some(Value::String(message)) = body.get("result") {
            return Err(ExplorerError::Provider(message.clone()));
        }
    }
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ExplorerError::Provider(message));
    }

    body.get_mut("result")
        .map(Value::take)
        .ok_or_else(|| ExplorerError::MissingField("result".to_string()))
}

impl std::fmt::Debug for ExplorerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerClient")
            .field("base_url", &redact_url(&self.inner.base_url))
            .field("api_key", &self.inner.api_key.as_ref().map(|_| "***"))
            .field("max_attempts", &self.inner.fetcher.policy().max_attempts())
            .finish()
    }
}
