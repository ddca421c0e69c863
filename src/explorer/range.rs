//! Block-range and direction filtering over a wallet's transactions.

use crate::explorer::client::DEFAULT_END_BLOCK;
use crate::explorer::transaction::Transaction;

/// Which side of a transfer the wallet must be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// The wallet is the recipient.
    In,
    /// The wallet is the sender.
    Out,
    #[default]
    All,
}

impl From<&str> for Direction {
    /// `"IN"` and `"OUT"` select a side. Anything else, including lower-case
    /// spellings, falls back to [`Direction::All`] instead of failing.
    fn from(raw: &str) -> Self {
        match raw {
            "IN" => Direction::In,
            "OUT" => Direction::Out,
            _ => Direction::All,
        }
    }
}

impl From<Option<&str>> for Direction {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Direction::from).unwrap_or_default()
    }
}

/// Bounds and direction for [`Wallet::transactions_range`](crate::explorer::Wallet::transactions_range).
///
/// Both bounds are exclusive: a transaction matches when
/// `after < block < before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeFilter {
    /// Upper bound, defaults to [`DEFAULT_END_BLOCK`].
    pub before: Option<u64>,
    /// Lower bound, defaults to 0.
    pub after: Option<u64>,
    pub direction: Direction,
}

impl RangeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(mut self, block: u64) -> Self {
        self.before = Some(block);
        self
    }

    pub fn after(mut self, block: u64) -> Self {
        self.after = Some(block);
        self
    }

    pub fn direction(mut self, direction: impl Into<Direction>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Whether `tx` passes this filter for the wallet at `address`.
    ///
    /// Only cached fields are consulted; a transaction without a known block
    /// never matches.
    pub fn matches(&self, tx: &Transaction, address: &str) -> bool {
        let Some(block) = tx.cached_block() else {
            return false;
        };
        let before = self.before.unwrap_or(DEFAULT_END_BLOCK);
        let after = self.after.unwrap_or(0);
        if block <= after || block >= before {
            return false;
        }

        match self.direction {
            Direction::All => true,
            Direction::In => tx.cached_recipient() == Some(address),
            Direction::Out => tx.cached_sender() == Some(address),
        }
    }
}

/// Lazy iterator over the transactions matching a [`RangeFilter`].
///
/// Cloning yields an independent iterator from the same position.
#[derive(Debug, Clone)]
pub struct TransactionRange<'a> {
    remaining: std::slice::Iter<'a, Transaction>,
    address: &'a str,
    filter: RangeFilter,
}

impl<'a> TransactionRange<'a> {
    pub(crate) fn new(transactions: &'a [Transaction], address: &'a str, filter: RangeFilter) -> Self {
        Self {
            remaining: transactions.iter(),
            address,
            filter,
        }
    }
}

impl<'a> Iterator for TransactionRange<'a> {
    type Item = &'a Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        let address = self.address;
        self.remaining.find(|tx| filter.matches(tx, address))
    }
}
