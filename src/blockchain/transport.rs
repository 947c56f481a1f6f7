use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::TransportError;
use crate::logging::LogContext;

/// The HTTP collaborator: one GET, raw body back.
///
/// Timeouts and connection reuse live behind this trait. Implementations
/// must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// `reqwest`-backed transport with a pooled client
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    timeout_seconds: u64,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let context = LogContext::new("http_transport", "initialization")
            .with_metadata("timeout_seconds", serde_json::json!(config.timeout_seconds));
        context.info("Initializing HTTP transport");

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            timeout_seconds: config.timeout_seconds,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout { seconds: self.timeout_seconds }
            } else if e.is_connect() {
                TransportError::Connection(e.to_string())
            } else {
                TransportError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout { seconds: self.timeout_seconds }
            } else {
                TransportError::Http(e)
            }
        })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
