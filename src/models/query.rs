use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExplorerError, Result};

/// A balance lookup for one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceQuery {
    pub address: String,
    /// Balance as of this block height; `None` uses the default confirmations
    pub target_block: Option<u64>,
    /// Total amount ever received instead of the current balance
    pub want_received_amount: bool,
    /// Explicit confirmation count, mutually exclusive with `target_block`
    pub confirmations: Option<i64>,
}

impl BalanceQuery {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            target_block: None,
            want_received_amount: false,
            confirmations: None,
        }
    }

    pub fn at_block(mut self, block: u64) -> Self {
        self.target_block = Some(block);
        self
    }

    pub fn received(mut self) -> Self {
        self.want_received_amount = true;
        self
    }

    pub fn with_confirmations(mut self, confirmations: i64) -> Self {
        self.confirmations = Some(confirmations);
        self
    }

    /// Reject combinations no explorer can express
    pub fn check(&self) -> Result<()> {
        if self.target_block.is_some() && self.confirmations.is_some() {
            return Err(ExplorerError::InvalidQuery(
                "target block and explicit confirmations cannot be combined".to_string(),
            ));
        }
        if matches!(self.confirmations, Some(c) if c < 0) {
            return Err(ExplorerError::InvalidQuery(
                "confirmations must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which explorer query a raw response body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Balance,
    BlockCount,
    Difficulty,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Balance => f.write_str("balance"),
            QueryKind::BlockCount => f.write_str("block count"),
            QueryKind::Difficulty => f.write_str("difficulty"),
        }
    }
}

/// A successfully normalized response value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedValue {
    /// Whole coins, already divided by the provider's divisor
    Balance(f64),
    BlockCount(u64),
    Difficulty(f64),
}

/// Result of a single fetch: a value or a classified failure
pub type FetchOutcome<T> = Result<T>;
