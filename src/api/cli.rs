use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::sync::Arc;
use thiserror::Error;

use crate::currencies::CurrencyRegistry;
use crate::error::ExplorerError;
use crate::models::BalanceQuery;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Explorer(#[from] ExplorerError),
    #[error("CLI operation failed: {0}")]
    Operation(String),
}

#[derive(Parser, Debug)]
#[command(name = "explorer-cli")]
#[command(about = "Query block explorers for balances, block height and difficulty")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to $CONFIG_FILE or config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List supported currencies and their capabilities
    Currencies,
    /// Check an address format without contacting the explorer
    Validate { code: String, address: String },
    /// Address balance in whole coins
    Balance {
        code: String,
        address: String,
        /// Balance as of this block height
        #[arg(long, conflicts_with = "confirmations")]
        block: Option<u64>,
        /// Total received instead of current balance
        #[arg(long)]
        received: bool,
        /// Explicit confirmation count
        #[arg(long)]
        confirmations: Option<i64>,
    },
    /// Current block height
    BlockCount { code: String },
    /// Current mining difficulty
    Difficulty { code: String },
}

/// Runs CLI commands against a currency registry
pub struct CliHandler {
    registry: Arc<CurrencyRegistry>,
}

impl CliHandler {
    pub fn new(registry: Arc<CurrencyRegistry>) -> Self {
        Self { registry }
    }

    /// Execute a command and return its printable output
    pub async fn execute_command(&self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Currencies => self.currencies(),
            Commands::Validate { code, address } => {
                let currency = self.registry.get(code)?;
                let verdict = if currency.is_valid(address) { "valid" } else { "invalid" };
                Ok(format!("{} address {} is {}", currency.code(), address, verdict))
            }
            Commands::Balance {
                code,
                address,
                block,
                received,
                confirmations,
            } => {
                let currency = self.registry.get(code)?;
                let query = BalanceQuery {
                    address: address.clone(),
                    target_block: *block,
                    want_received_amount: *received,
                    confirmations: *confirmations,
                };
                let balance = currency.balance(&query).await?;

                let label = if *received { "Received" } else { "Balance" };
                let mut out = format!("{}: {} {}", label, balance, currency.code().to_uppercase());
                if let Some(block) = block {
                    let _ = write!(out, " (at block {})", block);
                }
                let _ = write!(out, "\nExplorer: {}", currency.metadata().balance_url(address));
                Ok(out)
            }
            Commands::BlockCount { code } => {
                let currency = self.registry.get(code)?;
                Ok(format!("Block count: {}", currency.block_count().await?))
            }
            Commands::Difficulty { code } => {
                let currency = self.registry.get(code)?;
                Ok(format!("Difficulty: {}", currency.difficulty().await?))
            }
        }
    }

    fn currencies(&self) -> Result<String, CliError> {
        if self.registry.is_empty() {
            return Err(CliError::Operation("no currencies configured".to_string()));
        }

        let mut out = String::new();
        for currency in self.registry.iter() {
            let metadata = currency.metadata();
            let capabilities: Vec<String> = currency
                .capabilities()
                .iter()
                .map(|c| c.to_string())
                .collect();
            let _ = writeln!(
                out,
                "{:<4} {:<10} {} ({})",
                currency.code(),
                metadata.name,
                metadata.explorer_name,
                metadata.explorer_url
            );
            let _ = writeln!(out, "     supports: {}", capabilities.join(", "));
        }
        Ok(out.trim_end().to_string())
    }
}
