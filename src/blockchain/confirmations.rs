use std::future::Future;

use crate::error::Result;
use crate::logging::LogContext;

/// Blockchain.info cannot look back more than this many confirmations
pub const BLOCKCHAIN_INFO_MAX_CONFIRMATIONS: i64 = 120;

/// Turns an optional target block into the "confirmations back from now"
/// count explorer APIs take instead of absolute heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationResolver {
    ceiling: Option<i64>,
}

impl ConfirmationResolver {
    /// Clamp to `ceiling` and warn when the target lies further back
    pub fn with_ceiling(ceiling: i64) -> Self {
        Self { ceiling: Some(ceiling) }
    }

    pub fn unbounded() -> Self {
        Self { ceiling: None }
    }

    pub fn ceiling(&self) -> Option<i64> {
        self.ceiling
    }

    /// Confirmations between `current_height` and `target_block`.
    /// A target above the current height gives a negative count, passed through.
    pub fn confirmations_between(&self, current_height: u64, target_block: u64) -> i64 {
        let confirmations = current_height as i64 - target_block as i64;
        match self.ceiling {
            Some(ceiling) if confirmations >= ceiling => {
                LogContext::new("confirmation_resolver", "resolve")
                    .with_block_number(target_block)
                    .with_confirmations(confirmations)
                    .warn(&format!(
                        "Cannot request more than {} confirmations in the past, clamping",
                        ceiling
                    ));
                ceiling
            }
            _ => confirmations,
        }
    }

    /// Resolve the confirmation count for a balance query.
    ///
    /// Without a target block the default is returned and `fetch_current`
    /// is never called. Otherwise exactly one height lookup is made, and
    /// its failure is returned as is.
    pub async fn resolve<F, Fut>(
        &self,
        target_block: Option<u64>,
        fetch_current: F,
        default_confirmations: i64,
    ) -> Result<i64>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<u64>>,
    {
        let Some(target_block) = target_block else {
            return Ok(default_confirmations);
        };

        let context = LogContext::new("confirmation_resolver", "resolve")
            .with_block_number(target_block);
        context.info("Finding appropriate number of confirmations");

        let current_height = fetch_current().await?;
        let confirmations = self.confirmations_between(current_height, target_block);

        context
            .with_metadata("current_height", serde_json::json!(current_height))
            .with_confirmations(confirmations)
            .info(&format!("Confirmations necessary: {}", confirmations));

        Ok(confirmations)
    }
}
