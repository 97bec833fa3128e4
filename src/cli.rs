//! CLI commands for lotto-api.
//!
//! Supports API server mode and a one-shot history update.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::fetcher::LottoClient;
use crate::store::HistoryStore;
use crate::updater::run_update;

#[derive(Parser)]
#[command(name = "lotto-api")]
#[command(version, about = "Lotto 6/45 history sync, analysis, and recommendation API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },

    /// Sync the draw history once and exit
    Update {
        /// History file override
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

/// Run a one-shot history update from the terminal.
pub async fn run_cli_update(data: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(path) = data {
        config.store.path = path.to_string_lossy().to_string();
    }

    let store = HistoryStore::new(&config.store.path);
    let client = LottoClient::new(&config.upstream)?;

    let report = run_update(&store, &client, &config.updater).await?;
    println!("{}", report.message());
    if report.stopped_on_error {
        eprintln!("warning: run stopped on a failed fetch; rerun to resume");
    }
    Ok(())
}
