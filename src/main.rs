//! Lotto Analysis API
//!
//! REST API for incremental lotto draw history sync, frequency analysis,
//! and budget-based number recommendation.

mod analysis;
mod cli;
mod config;
mod fetcher;
mod recommend;
mod routes;
mod store;
mod types;
mod updater;

use axum::{routing::get, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::fetcher::LottoClient;
use crate::routes::AppState;
use crate::store::HistoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; the one-shot update command needs the fetcher's
    // warnings just as much as the server does.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lotto_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(Some(host), Some(port)).await,
        Commands::Update { data } => cli::run_cli_update(data).await,
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("History file: {}", config.store.path);

    let store = HistoryStore::new(&config.store.path);
    let client = LottoClient::new(&config.upstream)?;

    // Create application state
    let state = Arc::new(AppState {
        store,
        client,
        config: config.clone(),
        update_lock: Mutex::new(()),
    });

    // Build router; CORS stays permissive for the separate front-end
    let app = Router::new()
        .route("/", get(routes::status))
        .route("/api/update", get(routes::update))
        .route("/api/analysis", get(routes::analysis))
        .route("/api/recommend/:budget", get(routes::recommend_for_budget))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
