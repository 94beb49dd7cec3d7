//! Error types for match operations.

use super::types::{MatchId, SlotIndex};
use serde::{Deserialize, Serialize};

/// Broad category of a [`MatchError`], used by callers to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown match or slot.
    NotFound,
    /// Bad input the client must correct before resubmitting.
    Validation,
    /// The match is not in a state that allows the operation; re-query first.
    StateConflict,
    /// A match invariant was breached. Always a bug.
    Internal,
}

/// Error that can occur when operating on a match.
///
/// Each variant has a stable snake_case reason code (see [`MatchError::reason`])
/// that is safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchError {
    /// No match is registered under this id.
    #[display("Match {} not found", match_id)]
    NotFound {
        /// The id that was looked up.
        match_id: MatchId,
    },

    /// The slot index does not refer to a joined player.
    #[display("Slot {} is not a player in this match", slot)]
    InvalidSlot {
        /// The offending slot.
        slot: SlotIndex,
    },

    /// Two players have already joined.
    #[display("Match already has two players")]
    MatchFull,

    /// A player tried to join with a blank name.
    #[display("Player name must not be empty")]
    EmptyPlayerName,

    /// Secret word list had the wrong length.
    #[display("Expected 5 secret words, got {}", count)]
    InvalidWordCount {
        /// Number of words submitted.
        count: usize,
    },

    /// A submitted secret word is not in the lexicon.
    #[display("'{}' is not a known word", word)]
    UnknownWord {
        /// The rejected word, normalized.
        word: String,
    },

    /// The same secret word was submitted twice.
    #[display("'{}' appears more than once in the secret words", word)]
    DuplicateSecretWord {
        /// The repeated word, normalized.
        word: String,
    },

    /// Word chain rule broken: word must start with the previous word's last letter.
    #[display("'{}' must start with '{}'", word, expected)]
    BrokenChain {
        /// The word that broke the chain.
        word: String,
        /// Letter the word had to start with.
        expected: char,
    },

    /// Secret words can no longer be replaced.
    #[display("Secret words for slot {} are locked", slot)]
    WordsLocked {
        /// Slot whose words are locked.
        slot: SlotIndex,
    },

    /// Guess was blank after trimming.
    #[display("Guess must not be empty")]
    EmptyWord,

    /// The match is still waiting for a second player.
    #[display("Match has not started")]
    NotStarted,

    /// The match already has a winner.
    #[display("Match has already ended")]
    MatchEnded,

    /// Guess submitted out of turn.
    #[display("Not your turn. Waiting for slot {}", turn)]
    NotYourTurn {
        /// Slot that tried to guess.
        slot: SlotIndex,
        /// Slot whose turn it actually is.
        turn: SlotIndex,
    },

    /// The guesser already tried this word.
    #[display("'{}' was already guessed", word)]
    DuplicateGuess {
        /// The repeated guess, normalized.
        word: String,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", detail)]
    InvariantViolation {
        /// Descriptions of the broken invariants.
        detail: String,
    },
}

impl std::error::Error for MatchError {}

impl MatchError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::NotFound { .. } | MatchError::InvalidSlot { .. } => ErrorKind::NotFound,
            MatchError::EmptyPlayerName
            | MatchError::InvalidWordCount { .. }
            | MatchError::UnknownWord { .. }
            | MatchError::DuplicateSecretWord { .. }
            | MatchError::BrokenChain { .. }
            | MatchError::EmptyWord => ErrorKind::Validation,
            MatchError::MatchFull
            | MatchError::WordsLocked { .. }
            | MatchError::NotStarted
            | MatchError::MatchEnded
            | MatchError::NotYourTurn { .. }
            | MatchError::DuplicateGuess { .. } => ErrorKind::StateConflict,
            MatchError::InvariantViolation { .. } => ErrorKind::Internal,
        }
    }

    /// Machine-readable reason code, e.g. `not_your_turn`.
    pub fn reason(&self) -> &'static str {
        self.into()
    }
}
