//! Command-line interface for word_duel.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Word Duel - two-player secret word guessing server
#[derive(Parser, Debug)]
#[command(name = "word_duel")]
#[command(about = "Lobby server for two-player word duels", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Newline-separated word list
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Require each secret word to start with the previous word's last letter
        #[arg(long)]
        require_word_chain: bool,
    },

    /// Check a word against the lexicon and print the closest match
    Suggest {
        /// Word to look up
        word: String,

        /// Newline-separated word list
        #[arg(long, default_value = "words_alpha.txt")]
        lexicon: PathBuf,
    },
}
