use async_trait::async_trait;
use std::sync::Arc;

use super::plain_text::PlainTextApi;
use crate::blockchain::confirmations::{ConfirmationResolver, BLOCKCHAIN_INFO_MAX_CONFIRMATIONS};
use crate::blockchain::explorer::ExplorerClient;
use crate::blockchain::response_parser::{
    ErrorClassifier, ResponseParser, BLOCKCHAIN_INFO_ERRORS, SATOSHI_DIVISOR,
};
use crate::blockchain::transport::Transport;
use crate::config::ExplorerSettings;
use crate::models::FetchOutcome;

/// Bitcoin statistics from the Blockchain.info `/q/` API.
/// Balances come back in satoshis.
pub struct BlockchainInfo {
    api: PlainTextApi,
}

impl BlockchainInfo {
    pub const NAME: &'static str = "Blockchain.info";

    pub fn new(transport: Arc<dyn Transport>, settings: ExplorerSettings) -> Self {
        let parser = ResponseParser::new(SATOSHI_DIVISOR, ErrorClassifier::new(BLOCKCHAIN_INFO_ERRORS));
        Self {
            api: PlainTextApi::new(Self::NAME, transport, settings, Some("api_code"), parser),
        }
    }
}

#[async_trait]
impl ExplorerClient for BlockchainInfo {
    fn provider_name(&self) -> &'static str {
        Self::NAME
    }

    fn settings(&self) -> &ExplorerSettings {
        self.api.settings()
    }

    fn confirmation_resolver(&self) -> ConfirmationResolver {
        ConfirmationResolver::with_ceiling(BLOCKCHAIN_INFO_MAX_CONFIRMATIONS)
    }

    async fn get_balance(
        &self,
        address: &str,
        confirmations: i64,
        want_received: bool,
    ) -> FetchOutcome<f64> {
        let action = if want_received {
            "getreceivedbyaddress"
        } else {
            "addressbalance"
        };
        self.api.balance(&["q", action, address], address, confirmations).await
    }

    async fn get_block_count(&self) -> FetchOutcome<u64> {
        self.api.block_count(&["q", "getblockcount"]).await
    }

    async fn get_difficulty(&self) -> FetchOutcome<f64> {
        self.api.difficulty(&["q", "getdifficulty"]).await
    }
}
