use clap::Parser;
use coin_explorer::api::ApiServer;
use coin_explorer::config::AppConfig;
use coin_explorer::currencies::CurrencyRegistry;
use coin_explorer::logging::init_logging;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "coin-explorer-server")]
#[command(about = "HTTP API for block explorer balance, block height and difficulty queries")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(long)]
    config: Option<String>,

    /// Server port, overrides the configured one
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_with_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_logging(&config.logging)?;

    let registry = CurrencyRegistry::with_http(&config)
        .map_err(|e| format!("Failed to initialize HTTP transport: {}", e))?;
    let server = ApiServer::new(Arc::new(registry), &config.api);

    log::info!("Starting HTTP API server on {}:{}", config.api.host, config.api.port);

    if let Err(e) = server.start().await {
        log::error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
