mod check;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Product page price and stock extraction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List supported stores.
    Stores,
    /// Fetch one product page and print the extracted record as JSON.
    Check {
        /// Store id, as listed by `stores`.
        store: String,
        url: String,
        /// Previously saved record to compare against.
        #[arg(long)]
        since: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pricewatch_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Stores => check::print_stores(),
        Commands::Check { store, url, since } => {
            check::run_check(&config, &store, &url, since.as_deref()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
