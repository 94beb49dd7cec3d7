//! Server assembly: lexicon, engine, router and listener.

use crate::config::ServerConfig;
use crate::gateway;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, instrument};
use word_duel_core::{Lexicon, LexiconError, MatchEngine, MatchRegistry};

/// Loads the lexicon named by `config` and builds an engine over a fresh registry.
#[instrument(skip(config), fields(lexicon = %config.lexicon_path().display()))]
pub fn build_engine(config: &ServerConfig) -> Result<MatchEngine, LexiconError> {
    let lexicon = Lexicon::from_file(config.lexicon_path())?;
    Ok(MatchEngine::new(
        MatchRegistry::new(),
        Arc::new(lexicon),
        *config.rules(),
    ))
}

/// Runs the HTTP server until Ctrl+C.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn run(config: ServerConfig) -> Result<()> {
    let engine = build_engine(&config).context("Failed to load lexicon")?;
    let app = gateway::router(engine);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port()))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host(), config.port()))?;
    info!(addr = %listener.local_addr()?, "Word duel server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
