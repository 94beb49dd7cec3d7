//! Dictionary of legal words.

use derive_more::{Display, Error};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Normalizes a word for lexicon lookups and match bookkeeping.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Static set of valid words.
///
/// Keeps the load order alongside the lookup set so that suggestion
/// tie-breaking is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Lexicon {
    /// Builds a lexicon from an iterator of words. Entries are normalized;
    /// blanks and repeats are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::default();
        for word in words {
            let word = normalize(word.as_ref());
            if !word.is_empty() && lexicon.index.insert(word.clone()) {
                lexicon.words.push(word);
            }
        }
        lexicon
    }

    /// Loads a newline-separated word list (one word per line).
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        debug!("Loading lexicon from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LexiconError::new(format!(
                "Failed to read word list {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let lexicon = Self::from_words(content.lines());
        if lexicon.is_empty() {
            return Err(LexiconError::new(format!(
                "Word list {} contains no words",
                path.as_ref().display()
            )));
        }

        info!(words = lexicon.len(), "Lexicon loaded");
        Ok(lexicon)
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&normalize(word))
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates words in load order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Lexicon loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Lexicon error: {} at {}:{}", message, file, line)]
pub struct LexiconError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LexiconError {
    /// Creates a new lexicon error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
