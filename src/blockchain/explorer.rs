use async_trait::async_trait;

use crate::blockchain::confirmations::ConfirmationResolver;
use crate::config::ExplorerSettings;
use crate::models::FetchOutcome;

/// One explorer provider's view of a chain.
///
/// Implementations hold no mutable state, so a single instance can be shared
/// across tasks. Each method issues at most one request per step and never retries.
#[async_trait]
pub trait ExplorerClient: Send + Sync {
    /// Display name of the provider, e.g. "Blockchain.info"
    fn provider_name(&self) -> &'static str;

    fn settings(&self) -> &ExplorerSettings;

    /// Confirmation policy of this provider
    fn confirmation_resolver(&self) -> ConfirmationResolver;

    /// Balance (or total received) of `address` with `confirmations`, in whole coins
    async fn get_balance(
        &self,
        address: &str,
        confirmations: i64,
        want_received: bool,
    ) -> FetchOutcome<f64>;

    async fn get_block_count(&self) -> FetchOutcome<u64>;

    async fn get_difficulty(&self) -> FetchOutcome<f64>;

    /// Balance as of `target_block`, or with the default confirmations when absent.
    /// With a target block this is two requests in strict order: block count, then balance.
    async fn get_balance_at_block(
        &self,
        address: &str,
        target_block: Option<u64>,
        want_received: bool,
    ) -> FetchOutcome<f64> {
        let confirmations = self
            .confirmation_resolver()
            .resolve(
                target_block,
                || self.get_block_count(),
                self.settings().default_confirmations,
            )
            .await?;

        self.get_balance(address, confirmations, want_received).await
    }
}
