use std::sync::Arc;

use super::metadata::CurrencyMetadata;
use crate::blockchain::ExplorerClient;
use crate::error::{ExplorerError, Result};
use crate::logging::{ErrorLogger, LogContext};
use crate::models::{AddressValidationRule, BalanceQuery, Capability, CapabilitySet, FetchOutcome};

/// Binds a currency code to its validator, explorer client and capabilities.
/// Built once at startup and never mutated.
pub struct CurrencyDescriptor {
    code: &'static str,
    capabilities: CapabilitySet,
    validator: AddressValidationRule,
    client: Arc<dyn ExplorerClient>,
    metadata: CurrencyMetadata,
}

impl CurrencyDescriptor {
    pub fn new(
        code: &'static str,
        capabilities: &[Capability],
        validator: AddressValidationRule,
        client: Arc<dyn ExplorerClient>,
        metadata: CurrencyMetadata,
    ) -> Self {
        Self {
            code,
            capabilities: CapabilitySet::new(capabilities),
            validator,
            client,
            metadata,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn metadata(&self) -> &CurrencyMetadata {
        &self.metadata
    }

    pub fn client(&self) -> &Arc<dyn ExplorerClient> {
        &self.client
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn is_valid(&self, address: &str) -> bool {
        self.validator.is_valid(address)
    }

    fn require(&self, capability: Capability) -> Result<()> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(ExplorerError::UnsupportedOperation {
                currency: self.code.to_string(),
                operation: capability.to_string(),
            })
        }
    }

    /// Check the query against this currency's capabilities and address format.
    /// Runs before any network access.
    pub fn check_balance_query(&self, query: &BalanceQuery) -> Result<()> {
        query.check()?;
        if query.want_received_amount {
            self.require(Capability::ReceivedAmount)?;
        }
        if query.target_block.is_some() {
            self.require(Capability::BlockBalanceable)?;
        }
        if query.confirmations.is_some() {
            self.require(Capability::ConfirmableBalance)?;
        }
        if !self.is_valid(&query.address) {
            return Err(ExplorerError::InvalidAddressFormat {
                currency: self.code.to_string(),
                address: query.address.clone(),
            });
        }
        Ok(())
    }

    /// Balance (or total received) in whole coins
    pub async fn balance(&self, query: &BalanceQuery) -> FetchOutcome<f64> {
        let result = match self.check_balance_query(query) {
            Ok(()) => match query.confirmations {
                Some(confirmations) => {
                    self.client
                        .get_balance(&query.address, confirmations, query.want_received_amount)
                        .await
                }
                None => {
                    self.client
                        .get_balance_at_block(
                            &query.address,
                            query.target_block,
                            query.want_received_amount,
                        )
                        .await
                }
            },
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            let context = LogContext::new("currency", "balance")
                .with_currency(self.code)
                .with_address(&query.address);
            ErrorLogger::log_error(e, Some(context));
        }
        result
    }

    pub async fn block_count(&self) -> FetchOutcome<u64> {
        self.require(Capability::BlockHeight)?;
        let result = self.client.get_block_count().await;
        if let Err(e) = &result {
            ErrorLogger::log_error(e, Some(LogContext::new("currency", "block_count").with_currency(self.code)));
        }
        result
    }

    pub async fn difficulty(&self) -> FetchOutcome<f64> {
        self.require(Capability::Difficulty)?;
        let result = self.client.get_difficulty().await;
        if let Err(e) = &result {
            ErrorLogger::log_error(e, Some(LogContext::new("currency", "difficulty").with_currency(self.code)));
        }
        result
    }
}

impl std::fmt::Debug for CurrencyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyDescriptor")
            .field("code", &self.code)
            .field("capabilities", &self.capabilities)
            .field("provider", &self.client.provider_name())
            .finish()
    }
}
