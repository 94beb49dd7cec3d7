//! Word Duel - Unified CLI
//!
//! Lobby server for two-player word duels, plus a lexicon lookup helper.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use word_duel::ServerConfig;
use word_duel_core::{Lexicon, closest};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,word_duel=debug,word_duel_core=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            host,
            lexicon,
            require_word_chain,
        } => run_server(config, host, port, lexicon, require_word_chain).await,
        Command::Suggest { word, lexicon } => run_suggest(&word, lexicon),
    }
}

/// Run the HTTP game server
#[instrument]
async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    lexicon: Option<PathBuf>,
    require_word_chain: bool,
) -> Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?
        .apply_env()?
        .with_overrides(host, port, lexicon, require_word_chain);

    info!(?config, "Starting word duel server");
    word_duel::run(config).await
}

/// Look up a word and print the closest lexicon entry
#[instrument]
fn run_suggest(word: &str, lexicon_path: PathBuf) -> Result<()> {
    let lexicon = Lexicon::from_file(&lexicon_path)
        .with_context(|| format!("Failed to load {}", lexicon_path.display()))?;

    let valid = lexicon.contains(word);
    match closest(&lexicon, word) {
        Some(suggestion) => println!("{word}: valid={valid} closest={suggestion}"),
        None => println!("{word}: valid={valid} closest=-"),
    }
    Ok(())
}
