//! Word Duel library - HTTP lobby server for two-player word duels
//!
//! # Architecture
//!
//! - **Config**: layered server configuration (defaults, TOML, env, flags)
//! - **Gateway**: axum routes translating JSON requests into engine calls
//! - **Server**: lexicon loading, engine assembly and the listener loop
//!
//! Match state itself lives in [`word_duel_core`].
//!
//! # Example
//!
//! ```no_run
//! use word_duel::{ServerConfig, run};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load(None)?.apply_env()?;
//! run(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod gateway;
mod server;

// Crate-level exports - Configuration
pub use config::{ConfigError, ENV_HOST, ENV_LEXICON, ENV_PORT, ServerConfig};

// Crate-level exports - HTTP gateway
pub use gateway::{
    ApiError, AppState, CheckWordResponse, CreateLobbyResponse, ErrorBody, GuessRequest,
    GuessResponse, JoinLobbyRequest, JoinLobbyResponse, MALFORMED_REQUEST, NO_LETTER, StateQuery,
    StateResponse, SubmitWordsRequest, SubmitWordsResponse, SuggestResponse, WordQuery, router,
};

// Crate-level exports - Server
pub use server::{build_engine, run};
