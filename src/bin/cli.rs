use clap::Parser;
use coin_explorer::api::{Cli, CliHandler};
use coin_explorer::config::{AppConfig, LoggingConfig};
use coin_explorer::currencies::CurrencyRegistry;
use coin_explorer::logging::init_logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_with_path(path)?,
        None => AppConfig::load()?,
    };

    // Less verbose than the server unless LOG_LEVEL says otherwise
    let logging = LoggingConfig {
        level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        format: "json".to_string(),
    };
    init_logging(&logging)?;

    let registry = Arc::new(CurrencyRegistry::with_http(&config)?);
    let cli_handler = CliHandler::new(registry);

    match cli_handler.execute_command(&cli.command).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
