use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::currencies::{CurrencyDescriptor, CurrencyMetadata, CurrencyRegistry};
use crate::error::{BalanceError, ExplorerError, TransportError};
use crate::models::{BalanceQuery, CapabilitySet};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Server error: {0}")]
    Server(String),
}

/// Descriptor of a supported currency
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub code: &'static str,
    #[serde(flatten)]
    pub metadata: CurrencyMetadata,
    pub provider: &'static str,
    pub capabilities: CapabilitySet,
}

impl From<&CurrencyDescriptor> for CurrencyResponse {
    fn from(currency: &CurrencyDescriptor) -> Self {
        Self {
            code: currency.code(),
            metadata: *currency.metadata(),
            provider: currency.client().provider_name(),
            capabilities: currency.capabilities().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<CurrencyResponse>,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub currency: &'static str,
    pub address: String,
    pub valid: bool,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub currency: &'static str,
    pub address: String,
    pub balance: f64,
    pub received: bool,
    pub block: Option<u64>,
    pub explorer_url: String,
}

#[derive(Debug, Serialize)]
pub struct BlockCountResponse {
    pub currency: &'static str,
    pub block_count: u64,
}

#[derive(Debug, Serialize)]
pub struct DifficultyResponse {
    pub currency: &'static str,
    pub difficulty: f64,
}

/// Query parameters for the balance endpoint
#[derive(Debug, Default, Deserialize)]
pub struct BalanceParams {
    pub block: Option<u64>,
    #[serde(default)]
    pub received: bool,
    pub confirmations: Option<i64>,
}

impl BalanceParams {
    fn into_query(self, address: String) -> BalanceQuery {
        BalanceQuery {
            address,
            target_block: self.block,
            want_received_amount: self.received,
            confirmations: self.confirmations,
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// HTTP status and machine-readable code for a failed query
pub fn error_status(error: &ExplorerError) -> (StatusCode, &'static str) {
    match error {
        ExplorerError::UnknownCurrency(_) => (StatusCode::NOT_FOUND, "unknown_currency"),
        ExplorerError::UnsupportedOperation { .. } => {
            (StatusCode::BAD_REQUEST, "unsupported_operation")
        }
        ExplorerError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "invalid_query"),
        ExplorerError::InvalidAddressFormat { .. } => (StatusCode::BAD_REQUEST, "invalid_address"),
        ExplorerError::BalanceUnavailable { source, .. } => match source {
            BalanceError::ChecksumInvalid => (StatusCode::BAD_REQUEST, "checksum_invalid"),
            BalanceError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            BalanceError::UnrecognizedResponse(_) => {
                (StatusCode::BAD_GATEWAY, "unrecognized_response")
            }
        },
        ExplorerError::BlockCountUnavailable { .. } | ExplorerError::DifficultyUnavailable { .. } => {
            (StatusCode::BAD_GATEWAY, "unrecognized_response")
        }
        ExplorerError::Transport(TransportError::Timeout { .. }) => {
            (StatusCode::GATEWAY_TIMEOUT, "explorer_timeout")
        }
        ExplorerError::Transport(TransportError::Http(e)) if e.is_timeout() => {
            (StatusCode::GATEWAY_TIMEOUT, "explorer_timeout")
        }
        ExplorerError::Transport(_) => (StatusCode::BAD_GATEWAY, "explorer_unavailable"),
    }
}

fn error_response(error: ExplorerError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = error_status(&error);
    if status.is_server_error() {
        log::error!("Explorer query failed: {}", error);
    } else {
        log::debug!("Rejected query: {}", error);
    }
    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: error.to_string(),
        }),
    )
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CurrencyRegistry>,
}

/// Routes for the currency query API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/currencies", get(list_currencies))
        .route("/currencies/:code", get(get_currency))
        .route("/currencies/:code/validate/:address", get(validate_address))
        .route("/currencies/:code/balance/:address", get(get_balance))
        .route("/currencies/:code/blockcount", get(get_block_count))
        .route("/currencies/:code/difficulty", get(get_difficulty))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// HTTP API server
pub struct ApiServer {
    registry: Arc<CurrencyRegistry>,
    pub host: String,
    pub port: u16,
}

impl ApiServer {
    pub fn new(registry: Arc<CurrencyRegistry>, config: &ApiConfig) -> Self {
        Self {
            registry,
            host: config.host.clone(),
            port: config.port,
        }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), ApiError> {
        let app = create_router(AppState {
            registry: self.registry.clone(),
        });

        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        log::info!("HTTP API server starting on {}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| ApiError::Server(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// GET /currencies
pub async fn list_currencies(State(state): State<AppState>) -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse {
        currencies: state.registry.iter().map(CurrencyResponse::from).collect(),
    })
}

/// GET /currencies/:code
pub async fn get_currency(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> HandlerResult<CurrencyResponse> {
    let currency = state.registry.get(&code).map_err(error_response)?;
    Ok(Json(CurrencyResponse::from(currency)))
}

/// GET /currencies/:code/validate/:address - format check only, no explorer call
pub async fn validate_address(
    Path((code, address)): Path<(String, String)>,
    State(state): State<AppState>,
) -> HandlerResult<ValidationResponse> {
    let currency = state.registry.get(&code).map_err(error_response)?;
    Ok(Json(ValidationResponse {
        currency: currency.code(),
        valid: currency.is_valid(&address),
        address,
    }))
}

/// GET /currencies/:code/balance/:address
pub async fn get_balance(
    Path((code, address)): Path<(String, String)>,
    Query(params): Query<BalanceParams>,
    State(state): State<AppState>,
) -> HandlerResult<BalanceResponse> {
    let currency = state.registry.get(&code).map_err(error_response)?;
    let query = params.into_query(address);
    let balance = currency.balance(&query).await.map_err(error_response)?;

    Ok(Json(BalanceResponse {
        currency: currency.code(),
        balance,
        received: query.want_received_amount,
        block: query.target_block,
        explorer_url: currency.metadata().balance_url(&query.address),
        address: query.address,
    }))
}

/// GET /currencies/:code/blockcount
pub async fn get_block_count(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> HandlerResult<BlockCountResponse> {
    let currency = state.registry.get(&code).map_err(error_response)?;
    let block_count = currency.block_count().await.map_err(error_response)?;
    Ok(Json(BlockCountResponse {
        currency: currency.code(),
        block_count,
    }))
}

/// GET /currencies/:code/difficulty
pub async fn get_difficulty(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> HandlerResult<DifficultyResponse> {
    let currency = state.registry.get(&code).map_err(error_response)?;
    let difficulty = currency.difficulty().await.map_err(error_response)?;
    Ok(Json(DifficultyResponse {
        currency: currency.code(),
        difficulty,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = vec![
            (ExplorerError::UnknownCurrency("doge".into()), StatusCode::NOT_FOUND),
            (
                ExplorerError::UnsupportedOperation {
                    currency: "vtc".into(),
                    operation: "balance at block".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ExplorerError::BalanceUnavailable {
                    address: "1abc".into(),
                    source: BalanceError::RateLimited,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ExplorerError::BlockCountUnavailable { raw: "down".into() },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ExplorerError::Transport(TransportError::Timeout { seconds: 30 }),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ExplorerError::Transport(TransportError::Connection("refused".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error_status(&error).0, expected, "{}", error);
        }
    }

    #[test]
    fn test_balance_params_into_query() {
        let params = BalanceParams {
            block: Some(100),
            received: true,
            confirmations: None,
        };
        let query = params.into_query("1abc".to_string());
        assert_eq!(query, BalanceQuery::new("1abc").at_block(100).received());
    }
}
