use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use crate::error::ConfigError;

/// Confirmations sent with balance queries when no target block is given
pub const DEFAULT_CONFIRMATIONS: i64 = 6;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub currencies: CurrenciesConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Idle connections kept per explorer host
    pub pool_max_idle_per_host: usize,
    /// Seconds an idle pooled connection is kept
    pub pool_idle_timeout_seconds: u64,
}

/// Per-currency explorer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrenciesConfig {
    pub btc: CurrencyConfig,
    pub vtc: CurrencyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Explorer API base URL
    pub explorer_url: String,
    /// Default confirmations for balance queries
    pub confirmations: i64,
    /// Optional explorer API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server port
    pub port: u16,
    /// Server host/bind address
    pub host: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

/// Settings injected into a single explorer client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerSettings {
    pub base_url: String,
    pub default_confirmations: i64,
    pub api_key: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            pool_max_idle_per_host: 10,
            pool_idle_timeout_seconds: 30,
        }
    }
}

impl Default for CurrenciesConfig {
    fn default() -> Self {
        Self {
            btc: CurrencyConfig {
                explorer_url: "https://blockchain.info/".to_string(),
                confirmations: DEFAULT_CONFIRMATIONS,
                api_key: None,
            },
            vtc: CurrencyConfig {
                explorer_url: "http://vtc.sovereignshare.com/exp/".to_string(),
                confirmations: DEFAULT_CONFIRMATIONS,
                api_key: None,
            },
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl CurrencyConfig {
    pub fn settings(&self) -> ExplorerSettings {
        ExplorerSettings {
            base_url: self.explorer_url.clone(),
            default_confirmations: self.confirmations,
            api_key: self.api_key.clone().filter(|key| !key.trim().is_empty()),
        }
    }
}

impl CurrenciesConfig {
    /// Look up the configuration block for a currency code
    pub fn get(&self, code: &str) -> Option<&CurrencyConfig> {
        match code {
            "btc" => Some(&self.btc),
            "vtc" => Some(&self.vtc),
            _ => None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    /// Environment variables take precedence over file values
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_with_path(&config_path)
    }

    /// Same as [`AppConfig::load`] with an explicit file path
    pub fn load_with_path(path: &str) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_path(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when it is missing
    pub fn load_from_path(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parsing(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(timeout) = env::var("HTTP_TIMEOUT_SECONDS") {
            self.http.timeout_seconds = parse_env("HTTP_TIMEOUT_SECONDS", timeout)?;
        }

        // Bitcoin / Blockchain.info
        if let Ok(url) = env::var("BTC_EXPLORER_URL") {
            self.currencies.btc.explorer_url = url;
        }
        if let Ok(confirmations) = env::var("BTC_CONFIRMATIONS") {
            self.currencies.btc.confirmations = parse_env("BTC_CONFIRMATIONS", confirmations)?;
        }
        if let Ok(key) = env::var("BLOCKCHAIN_API_KEY") {
            self.currencies.btc.api_key = Some(key);
        }

        // Vertcoin
        if let Ok(url) = env::var("VTC_EXPLORER_URL") {
            self.currencies.vtc.explorer_url = url;
        }
        if let Ok(confirmations) = env::var("VTC_CONFIRMATIONS") {
            self.currencies.vtc.confirmations = parse_env("VTC_CONFIRMATIONS", confirmations)?;
        }

        if let Ok(host) = env::var("API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = env::var("API_PORT") {
            self.api.port = parse_env("API_PORT", port)?;
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(ConfigError::InvalidValue {
                key: "http.timeout_seconds".to_string(),
                value: self.http.timeout_seconds.to_string(),
            });
        }

        for (code, currency) in [("btc", &self.currencies.btc), ("vtc", &self.currencies.vtc)] {
            let url = &currency.explorer_url;
            if !(url.starts_with("http://") || url.starts_with("https://"))
                || reqwest::Url::parse(url).is_err()
            {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
            if currency.confirmations < 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("currencies.{}.confirmations", code),
                    value: currency.confirmations.to_string(),
                });
            }
        }

        if self.api.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "api.port".to_string(),
                value: self.api.port.to_string(),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                value: self.logging.format.clone(),
            });
        }

        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample_config() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Self::default()).map_err(|e| ConfigError::Parsing(e.to_string()))
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parsing(e.to_string()))?;
        fs::write(path, content).map_err(|_| ConfigError::FileNotFound(path.to_string()))?;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}
