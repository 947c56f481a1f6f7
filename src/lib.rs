pub mod blockchain;
pub mod currencies;
pub mod models;
pub mod api;
pub mod error;
pub mod logging;
pub mod config;

pub use blockchain::{ExplorerClient, HttpTransport, Transport};
pub use currencies::{CurrencyDescriptor, CurrencyRegistry};
pub use error::{BalanceError, ExplorerError, Result, TransportError};
pub use logging::{LogContext, PerformanceMonitor, ErrorLogger, MetricsLogger};
pub use config::{AppConfig, HttpConfig, CurrenciesConfig, CurrencyConfig, ApiConfig, LoggingConfig, ExplorerSettings};
