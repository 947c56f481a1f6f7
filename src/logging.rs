use log::{info, warn, error, debug, trace, LevelFilter};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::LoggingConfig;
use crate::error::{ErrorSeverity, ExplorerError};

/// Structured logging context for explorer queries
pub struct LogContext {
    pub component: String,
    pub operation: String,
    pub metadata: HashMap<String, Value>,
}

impl LogContext {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn with_currency(self, code: &str) -> Self {
        self.with_metadata("currency", json!(code))
    }

    pub fn with_address(self, address: &str) -> Self {
        self.with_metadata("address", json!(address))
    }

    pub fn with_url(self, url: &str) -> Self {
        self.with_metadata("url", json!(url))
    }

    pub fn with_block_number(self, block_number: u64) -> Self {
        self.with_metadata("block_number", json!(block_number))
    }

    pub fn with_confirmations(self, confirmations: i64) -> Self {
        self.with_metadata("confirmations", json!(confirmations))
    }

    pub fn with_duration_ms(self, duration_ms: u64) -> Self {
        self.with_metadata("duration_ms", json!(duration_ms))
    }

    fn format_message(&self, level: &str, message: &str) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut log_entry = json!({
            "timestamp": timestamp,
            "level": level,
            "component": self.component,
            "operation": self.operation,
            "message": message,
        });

        for (key, value) in &self.metadata {
            log_entry[key] = value.clone();
        }

        log_entry.to_string()
    }

    pub fn info(&self, message: &str) {
        info!("{}", self.format_message("INFO", message));
    }

    pub fn warn(&self, message: &str) {
        warn!("{}", self.format_message("WARN", message));
    }

    pub fn error(&self, message: &str) {
        error!("{}", self.format_message("ERROR", message));
    }

    pub fn debug(&self, message: &str) {
        debug!("{}", self.format_message("DEBUG", message));
    }

    pub fn trace(&self, message: &str) {
        trace!("{}", self.format_message("TRACE", message));
    }
}

/// Times a single explorer request
pub struct PerformanceMonitor {
    pub start_time: SystemTime,
    operation: String,
    metadata: HashMap<String, Value>,
}

impl PerformanceMonitor {
    pub fn new(operation: &str) -> Self {
        Self {
            start_time: SystemTime::now(),
            operation: operation.to_string(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn finish_with_result<T, E>(self, result: &Result<T, E>) -> u64
    where
        E: std::fmt::Display,
    {
        let duration = SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or_default()
            .as_millis() as u64;

        let mut context = LogContext::new("performance", &self.operation)
            .with_duration_ms(duration);

        for (key, value) in self.metadata {
            context = context.with_metadata(&key, value);
        }

        match result {
            Ok(_) => context.debug(&format!("Request completed in {}ms", duration)),
            Err(e) => {
                context = context.with_metadata("error", json!(e.to_string()));
                context.warn(&format!("Request failed after {}ms: {}", duration, e));
            }
        }

        duration
    }
}

/// Error logging utilities
pub struct ErrorLogger;

impl ErrorLogger {
    pub fn log_error(error: &ExplorerError, context: Option<LogContext>) {
        let severity = error.severity();

        let log_context = context
            .unwrap_or_else(|| LogContext::new("error", "unknown"))
            .with_metadata("error_type", json!(format!("{:?}", error)))
            .with_metadata("severity", json!(format!("{:?}", severity)))
            .with_metadata("retryable", json!(error.is_retryable()));

        let message = format!("Query failed: {}", error);

        match severity {
            ErrorSeverity::High => log_context.error(&message),
            ErrorSeverity::Medium => log_context.warn(&message),
            ErrorSeverity::Low => log_context.info(&message),
        }
    }
}

/// Explorer call metrics
pub struct MetricsLogger;

impl MetricsLogger {
    pub fn log_explorer_call(provider: &str, endpoint: &str, duration_ms: u64, success: bool) {
        let context = LogContext::new("metrics", "explorer_call")
            .with_metadata("provider", json!(provider))
            .with_metadata("endpoint", json!(endpoint))
            .with_duration_ms(duration_ms)
            .with_metadata("success", json!(success));

        if success {
            context.debug(&format!("{} {} completed in {}ms", provider, endpoint, duration_ms));
        } else {
            context.warn(&format!("{} {} failed after {}ms", provider, endpoint, duration_ms));
        }
    }
}

/// Initialize structured logging for the binaries.
/// `RUST_LOG` still wins over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let level = config.level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    let pretty_json = config.format == "pretty";

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| {
            use std::io::Write;

            let message = record.args().to_string();
            match serde_json::from_str::<Value>(&message) {
                Ok(json_value) if pretty_json => {
                    writeln!(buf, "{}", serde_json::to_string_pretty(&json_value)?)
                }
                Ok(json_value) => writeln!(buf, "{}", json_value),
                // Plain messages from dependencies
                Err(_) => writeln!(
                    buf,
                    "{} [{}] {}: {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ),
            }
        })
        .try_init()?;

    info!("Structured logging initialized at level {}", level);
    Ok(())
}
