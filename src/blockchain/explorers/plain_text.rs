use reqwest::Url;
use serde_json::json;
use std::sync::Arc;

use crate::blockchain::response_parser::ResponseParser;
use crate::blockchain::transport::Transport;
use crate::config::ExplorerSettings;
use crate::error::{ExplorerError, TransportError};
use crate::logging::{LogContext, MetricsLogger, PerformanceMonitor};
use crate::models::FetchOutcome;

/// Request plumbing for explorers that answer `/q/` queries with a bare
/// number in the body (Blockchain.info and Abe-style explorers).
pub struct PlainTextApi {
    provider: &'static str,
    transport: Arc<dyn Transport>,
    settings: ExplorerSettings,
    api_key_param: Option<&'static str>,
    parser: ResponseParser,
}

impl PlainTextApi {
    pub fn new(
        provider: &'static str,
        transport: Arc<dyn Transport>,
        settings: ExplorerSettings,
        api_key_param: Option<&'static str>,
        parser: ResponseParser,
    ) -> Self {
        Self {
            provider,
            transport,
            settings,
            api_key_param,
            parser,
        }
    }

    pub fn provider(&self) -> &'static str {
        self.provider
    }

    pub fn settings(&self) -> &ExplorerSettings {
        &self.settings
    }

    pub fn parser(&self) -> &ResponseParser {
        &self.parser
    }

    /// Base URL with `segments` appended; each segment is percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let base = &self.settings.base_url;
        let mut url = Url::parse(base)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` through the transport, attaching the API key when configured
    async fn fetch(&self, operation: &str, mut url: Url) -> Result<String, TransportError> {
        let context = LogContext::new(self.provider, operation).with_url(url.as_str());
        context.info(&format!("Requesting {}", url));

        if let (Some(param), Some(key)) = (self.api_key_param, self.settings.api_key.as_deref()) {
            context.info(&format!("Using {} API key.", self.provider));
            url.query_pairs_mut().append_pair(param, key);
        }

        let monitor = PerformanceMonitor::new(&format!("{}_{}", self.provider, operation))
            .with_metadata("operation", json!(operation));
        let result = self.transport.get(url.as_str()).await;
        let duration = monitor.finish_with_result(&result);
        MetricsLogger::log_explorer_call(self.provider, operation, duration, result.is_ok());

        result
    }

    pub async fn balance(
        &self,
        segments: &[&str],
        address: &str,
        confirmations: i64,
    ) -> FetchOutcome<f64> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut()
            .append_pair("confirmations", &confirmations.to_string());

        let context = LogContext::new(self.provider, "get_balance")
            .with_address(address)
            .with_confirmations(confirmations);

        let raw = match self.fetch("get_balance", url).await {
            Ok(raw) => raw,
            // Providers send their known error strings with non-2xx statuses too
            Err(TransportError::Status { status, body }) => {
                return match self.parser.classifier().match_known(body.trim()) {
                    Some(source) => {
                        context.error(&format!(
                            "{} balance for {} failed: {}",
                            self.provider, address, source
                        ));
                        Err(ExplorerError::BalanceUnavailable {
                            address: address.to_string(),
                            source,
                        })
                    }
                    None => Err(TransportError::Status { status, body }.into()),
                };
            }
            Err(e) => return Err(e.into()),
        };

        match self.parser.parse_balance(&raw) {
            Ok(balance) => {
                context
                    .with_metadata("balance", json!(balance))
                    .info(&format!("{} balance for {}: {}", self.provider, address, balance));
                Ok(balance)
            }
            Err(source) => {
                context.error(&format!(
                    "{} balance for {} is non-numeric: {}",
                    self.provider, address, raw
                ));
                Err(ExplorerError::BalanceUnavailable {
                    address: address.to_string(),
                    source,
                })
            }
        }
    }

    pub async fn block_count(&self, segments: &[&str]) -> FetchOutcome<u64> {
        let url = self.endpoint(segments)?;
        let raw = self.fetch("get_block_count", url).await?;

        let context = LogContext::new(self.provider, "get_block_count");
        let result = self.parser.parse_block_count(&raw);
        match &result {
            Ok(count) => context.with_block_number(*count).info(&format!("Block count: {}", count)),
            Err(_) => context.error(&format!("Block count is non-numeric: {}", raw)),
        }
        result
    }

    pub async fn difficulty(&self, segments: &[&str]) -> FetchOutcome<f64> {
        let url = self.endpoint(segments)?;
        let raw = self.fetch("get_difficulty", url).await?;

        let context = LogContext::new(self.provider, "get_difficulty");
        let result = self.parser.parse_difficulty(&raw);
        match &result {
            Ok(difficulty) => context.info(&format!("Difficulty: {}", difficulty)),
            Err(_) => context.error(&format!("Difficulty is non-numeric: {}", raw)),
        }
        result
    }
}
