use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use coin_explorer::blockchain::Transport;
use coin_explorer::config::AppConfig;
use coin_explorer::currencies::CurrencyRegistry;
use coin_explorer::error::{ExplorerError, TransportError};
use coin_explorer::models::{BalanceQuery, BITCOIN_ADDRESS_RULE, VERTCOIN_ADDRESS_RULE};

/// Counts requests; any request at all is a test failure signal
#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for CountingTransport {
    async fn get(&self, _url: &str) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("0".to_string())
    }
}

#[test]
fn test_address_lengths_outside_bounds_are_rejected() {
    for rule in [BITCOIN_ADDRESS_RULE, VERTCOIN_ADDRESS_RULE] {
        let prefix = rule.allowed_prefixes[0];
        for len in 1..=60usize {
            let address: String = std::iter::once(prefix)
                .chain(std::iter::repeat('k').take(len - 1))
                .collect();
            let expected = (27..=34).contains(&len);
            assert_eq!(rule.is_valid(&address), expected, "length {} with {:?}", len, rule);
        }
    }
}

#[test]
fn test_non_alphanumeric_characters_are_rejected() {
    let base = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
    for bad in ['-', '_', ' ', '.', '/', '?', 'é', '+'] {
        let mut address: Vec<char> = base.chars().collect();
        address[10] = bad;
        let address: String = address.into_iter().collect();
        assert!(!BITCOIN_ADDRESS_RULE.is_valid(&address), "{:?} accepted", address);
    }
}

#[test]
fn test_prefixes_are_currency_specific() {
    let body = "A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
    assert!(BITCOIN_ADDRESS_RULE.is_valid(&format!("1{}", body)));
    assert!(!VERTCOIN_ADDRESS_RULE.is_valid(&format!("1{}", body)));
    assert!(VERTCOIN_ADDRESS_RULE.is_valid(&format!("V{}", body)));
    assert!(!BITCOIN_ADDRESS_RULE.is_valid(&format!("v{}", body)));
}

#[tokio::test]
async fn test_rejected_queries_never_reach_the_network() {
    let transport = Arc::new(CountingTransport::default());
    let registry = CurrencyRegistry::from_config(&AppConfig::default(), transport.clone());

    let btc = registry.get("btc").unwrap();
    let vtc = registry.get("vtc").unwrap();

    let rejected = vec![
        btc.balance(&BalanceQuery::new("")).await,
        btc.balance(&BalanceQuery::new("VA1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")).await,
        btc.balance(&BalanceQuery::new("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").with_confirmations(-2)).await,
        btc.balance(
            &BalanceQuery::new("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")
                .at_block(10)
                .with_confirmations(1),
        )
        .await,
        vtc.balance(&BalanceQuery::new("Vn4e5JY4UJLUKAk3pxWC5xgTTA4pfUKS4V").at_block(10)).await,
        vtc.balance(&BalanceQuery::new("Vn4e5JY4UJLUKAk3pxWC5xgTTA4pfUKS4V").with_confirmations(1)).await,
    ];

    for result in rejected {
        assert!(
            matches!(
                result,
                Err(ExplorerError::InvalidAddressFormat { .. })
                    | Err(ExplorerError::InvalidQuery(_))
                    | Err(ExplorerError::UnsupportedOperation { .. })
            ),
            "{:?}",
            result
        );
    }
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);

    // A well-formed query does go out
    btc.balance(&BalanceQuery::new("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")).await.unwrap();
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}
