use thiserror::Error;

/// Main error type for explorer queries
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Invalid {currency} address format: {address}")]
    InvalidAddressFormat { currency: String, address: String },

    #[error("Balance unavailable for {address}: {source}")]
    BalanceUnavailable {
        address: String,
        #[source]
        source: BalanceError,
    },

    #[error("Block count unavailable, provider returned non-numeric value: '{raw}'")]
    BlockCountUnavailable { raw: String },

    #[error("Difficulty unavailable, provider returned non-numeric value: '{raw}'")]
    DifficultyUnavailable { raw: String },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Currency {currency} does not support {operation}")]
    UnsupportedOperation { currency: String, operation: String },

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Classified non-numeric balance responses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Checksum does not validate")]
    ChecksumInvalid,

    #[error("Maximum concurrent requests reached")]
    RateLimited,

    #[error("Provider returned non-numeric balance: '{0}'")]
    UnrecognizedResponse(String),
}

/// Failures of the HTTP collaborator itself
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Timeout after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Configuration parsing failed: {0}")]
    Parsing(String),

    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The provider or network is failing
    High,
    /// Transient conditions such as rate limits and timeouts
    Medium,
    /// Caller mistakes: bad addresses, unsupported operations
    Low,
}

impl ExplorerError {
    /// Get the severity level of an error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExplorerError::Transport(TransportError::Timeout { .. }) => ErrorSeverity::Medium,
            ExplorerError::BalanceUnavailable { source: BalanceError::RateLimited, .. } => {
                ErrorSeverity::Medium
            }
            ExplorerError::Transport(_) => ErrorSeverity::High,
            ExplorerError::BalanceUnavailable { source: BalanceError::UnrecognizedResponse(_), .. } => {
                ErrorSeverity::High
            }
            ExplorerError::BlockCountUnavailable { .. } => ErrorSeverity::High,
            ExplorerError::DifficultyUnavailable { .. } => ErrorSeverity::High,

            ExplorerError::InvalidAddressFormat { .. } => ErrorSeverity::Low,
            ExplorerError::BalanceUnavailable { source: BalanceError::ChecksumInvalid, .. } => {
                ErrorSeverity::Low
            }
            ExplorerError::UnsupportedOperation { .. } => ErrorSeverity::Low,
            ExplorerError::UnknownCurrency(_) => ErrorSeverity::Low,
            ExplorerError::InvalidQuery(_) => ErrorSeverity::Low,
        }
    }

    /// Whether re-issuing the same request later may succeed.
    /// Nothing in this crate retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExplorerError::BalanceUnavailable { source: BalanceError::RateLimited, .. } => true,
            ExplorerError::Transport(TransportError::Timeout { .. }) => true,
            ExplorerError::Transport(TransportError::Connection(_)) => true,
            ExplorerError::Transport(TransportError::Status { status, .. }) => {
                *status == 429 || *status >= 500
            }
            _ => false,
        }
    }

    /// The balance sub-classification, if this is a balance failure
    pub fn balance_error(&self) -> Option<&BalanceError> {
        match self {
            ExplorerError::BalanceUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}
