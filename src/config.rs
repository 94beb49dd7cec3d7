//! Server configuration.
//!
//! Values are resolved in layers: built-in defaults, then an optional TOML
//! file, then `WORD_DUEL_*` environment variables, then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use word_duel_core::MatchRules;

/// Environment variable overriding the bind host.
pub const ENV_HOST: &str = "WORD_DUEL_HOST";
/// Environment variable overriding the bind port.
pub const ENV_PORT: &str = "WORD_DUEL_PORT";
/// Environment variable overriding the word list path.
pub const ENV_LEXICON: &str = "WORD_DUEL_LEXICON";

/// Configuration for the word duel HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Newline-separated word list used to validate secret words.
    #[serde(default = "default_lexicon_path")]
    lexicon_path: PathBuf,

    /// Match rules.
    #[serde(default)]
    rules: MatchRules,
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    3000
}

#[instrument]
fn default_lexicon_path() -> PathBuf {
    PathBuf::from("words_alpha.txt")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            lexicon_path: default_lexicon_path(),
            rules: MatchRules::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if given, otherwise starts from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies `WORD_DUEL_*` variables from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies `WORD_DUEL_*` variables resolved through `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn apply_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(ENV_HOST) {
            debug!(%host, "Host from environment");
            self.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {} value '{}': {}", ENV_PORT, port, e))
            })?;
            debug!(port = self.port, "Port from environment");
        }

        if let Some(path) = lookup(ENV_LEXICON) {
            debug!(%path, "Lexicon path from environment");
            self.lexicon_path = PathBuf::from(path);
        }

        Ok(self)
    }

    /// Applies explicit overrides, typically from the command line.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        lexicon_path: Option<PathBuf>,
        require_word_chain: bool,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(path) = lexicon_path {
            self.lexicon_path = path;
        }
        if require_word_chain {
            self.rules.require_word_chain = true;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
