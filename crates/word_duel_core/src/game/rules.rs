//! Validation rules for secret word lists and guesses.

use super::error::MatchError;
use super::types::SECRET_WORD_COUNT;
use crate::lexicon::{Lexicon, normalize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Tunable match rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Each secret word must start with the last letter of the one before it.
    #[serde(default)]
    pub require_word_chain: bool,
}

impl MatchRules {
    /// Validates a secret word submission and returns the normalized list.
    ///
    /// Checks run in order: count, duplicates, lexicon membership, chain.
    #[instrument(skip(self, words, lexicon), fields(count = words.len()))]
    pub fn validate_secret_words<S: AsRef<str>>(
        &self,
        words: &[S],
        lexicon: &Lexicon,
    ) -> Result<Vec<String>, MatchError> {
        if words.len() != SECRET_WORD_COUNT {
            return Err(MatchError::InvalidWordCount { count: words.len() });
        }

        let normalized: Vec<String> = words.iter().map(|w| normalize(w.as_ref())).collect();

        let mut seen = HashSet::with_capacity(SECRET_WORD_COUNT);
        for word in &normalized {
            if !seen.insert(word.as_str()) {
                return Err(MatchError::DuplicateSecretWord { word: word.clone() });
            }
        }

        if let Some(word) = normalized.iter().find(|w| !lexicon.contains(w)) {
            return Err(MatchError::UnknownWord { word: word.clone() });
        }

        if self.require_word_chain {
            check_chain(&normalized)?;
        }

        debug!("Secret words accepted");
        Ok(normalized)
    }
}

/// Normalizes a guess, rejecting blanks.
pub fn normalize_guess(word: &str) -> Result<String, MatchError> {
    let word = normalize(word);
    if word.is_empty() {
        return Err(MatchError::EmptyWord);
    }
    Ok(word)
}

fn check_chain(words: &[String]) -> Result<(), MatchError> {
    for pair in words.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if let Some(expected) = prev.chars().last()
            && !next.starts_with(expected)
        {
            return Err(MatchError::BrokenChain {
                word: next.clone(),
                expected,
            });
        }
    }
    Ok(())
}
