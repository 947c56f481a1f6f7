use std::collections::BTreeMap;
use std::sync::Arc;

use super::descriptor::CurrencyDescriptor;
use super::{bitcoin, vertcoin};
use crate::blockchain::{HttpTransport, Transport};
use crate::config::AppConfig;
use crate::error::{ExplorerError, Result, TransportError};
use crate::logging::LogContext;

/// Dispatch table of supported currencies, keyed by lowercase code
pub struct CurrencyRegistry {
    currencies: BTreeMap<&'static str, CurrencyDescriptor>,
}

impl CurrencyRegistry {
    pub fn new(descriptors: Vec<CurrencyDescriptor>) -> Self {
        Self {
            currencies: descriptors.into_iter().map(|d| (d.code(), d)).collect(),
        }
    }

    /// Every supported currency, sharing one transport
    pub fn from_config(config: &AppConfig, transport: Arc<dyn Transport>) -> Self {
        let registry = Self::new(vec![
            bitcoin::descriptor(transport.clone(), config.currencies.btc.settings()),
            vertcoin::descriptor(transport, config.currencies.vtc.settings()),
        ]);

        LogContext::new("currency_registry", "initialization")
            .with_metadata("currencies", serde_json::json!(registry.codes()))
            .info("Currency registry ready");
        registry
    }

    /// Registry backed by a real HTTP transport
    pub fn with_http(config: &AppConfig) -> std::result::Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::from_config(config, Arc::new(transport)))
    }

    pub fn get(&self, code: &str) -> Result<&CurrencyDescriptor> {
        self.currencies
            .get(code.to_ascii_lowercase().as_str())
            .ok_or_else(|| ExplorerError::UnknownCurrency(code.to_string()))
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.currencies.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyDescriptor> {
        self.currencies.values()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}
