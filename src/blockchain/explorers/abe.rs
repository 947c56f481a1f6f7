use async_trait::async_trait;
use std::sync::Arc;

use super::plain_text::PlainTextApi;
use crate::blockchain::confirmations::ConfirmationResolver;
use crate::blockchain::explorer::ExplorerClient;
use crate::blockchain::response_parser::{ErrorClassifier, ResponseParser, WHOLE_COIN_DIVISOR};
use crate::blockchain::transport::Transport;
use crate::config::ExplorerSettings;
use crate::models::FetchOutcome;

/// Abe-style block explorer (`chain/<Chain>/q/...`).
/// Balances are reported in whole coins; there is no confirmation ceiling.
pub struct AbeExplorer {
    chain: &'static str,
    api: PlainTextApi,
}

impl AbeExplorer {
    pub fn new(
        name: &'static str,
        chain: &'static str,
        transport: Arc<dyn Transport>,
        settings: ExplorerSettings,
    ) -> Self {
        let parser = ResponseParser::new(WHOLE_COIN_DIVISOR, ErrorClassifier::empty());
        Self {
            chain,
            api: PlainTextApi::new(name, transport, settings, None, parser),
        }
    }

    /// The Vertcoin explorer
    pub fn vertcoin(transport: Arc<dyn Transport>, settings: ExplorerSettings) -> Self {
        Self::new("Vertcoin Block Explorer", "Vertcoin", transport, settings)
    }
}

#[async_trait]
impl ExplorerClient for AbeExplorer {
    fn provider_name(&self) -> &'static str {
        self.api.provider()
    }

    fn settings(&self) -> &ExplorerSettings {
        self.api.settings()
    }

    fn confirmation_resolver(&self) -> ConfirmationResolver {
        ConfirmationResolver::unbounded()
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
        self.api
            .balance(&["chain", self.chain, "q", action, address], address, confirmations)
            .await
    }

    async fn get_block_count(&self) -> FetchOutcome<u64> {
        self.api.block_count(&["chain", self.chain, "q", "getblockcount"]).await
    }

    async fn get_difficulty(&self) -> FetchOutcome<f64> {
        self.api.difficulty(&["chain", self.chain, "q", "getdifficulty"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BalanceError, TransportError};
    use std::sync::Mutex;

    struct EchoTransport {
        body: &'static str,
        requests: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for EchoTransport {
        async fn get(&self, url: &str) -> Result<String, TransportError> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(self.body.to_string())
        }
    }

    fn client(body: &'static str) -> (AbeExplorer, Arc<EchoTransport>) {
        let transport = Arc::new(EchoTransport {
            body,
            requests: Mutex::new(Vec::new()),
        });
        let settings = ExplorerSettings {
            base_url: "http://vtc.sovereignshare.com/exp/".to_string(),
            default_confirmations: 6,
            // Ignored: Abe explorers take no key
            api_key: Some("unused".to_string()),
        };
        (AbeExplorer::vertcoin(transport.clone(), settings), transport)
    }

    #[tokio::test]
    async fn test_balance_is_whole_coins() {
        let (explorer, transport) = client("12.5");
        let address = "Vn4e5JY4UJLUKAk3pxWC5xgTTA4pfUKS4V";

        assert_eq!(explorer.get_balance(address, 6, false).await.unwrap(), 12.5);
        assert_eq!(
            transport.requests.lock().unwrap()[0],
            format!(
                "http://vtc.sovereignshare.com/exp/chain/Vertcoin/q/addressbalance/{}?confirmations=6",
                address
            )
        );
    }

    #[tokio::test]
    async fn test_block_count_endpoint() {
        let (explorer, transport) = client("1234567");
        assert_eq!(explorer.get_block_count().await.unwrap(), 1234567);
        assert_eq!(
            transport.requests.lock().unwrap()[0],
            "http://vtc.sovereignshare.com/exp/chain/Vertcoin/q/getblockcount"
        );
        assert_eq!(explorer.provider_name(), "Vertcoin Block Explorer");
    }

    #[tokio::test]
    async fn test_far_target_block_is_not_clamped() {
        let (explorer, transport) = client("1000");
        // Block count and balance both answer "1000"
        let balance = explorer
            .get_balance_at_block("Vn4e5JY4UJLUKAk3pxWC5xgTTA4pfUKS4V", Some(100), true)
            .await
            .unwrap();
        assert_eq!(balance, 1000.0);

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].contains("/q/getreceivedbyaddress/"));
        assert!(requests[1].ends_with("?confirmations=900"));
    }

    #[tokio::test]
    async fn test_errors_are_unrecognized() {
        let (explorer, _) = client("ERROR: address invalid");
        let err = explorer
            .get_balance("Vn4e5JY4UJLUKAk3pxWC5xgTTA4pfUKS4V", 6, false)
            .await
            .unwrap_err();
        assert_eq!(
            err.balance_error(),
            Some(&BalanceError::UnrecognizedResponse("ERROR: address invalid".to_string()))
        );
    }
}
