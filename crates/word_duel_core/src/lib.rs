//! Word Duel core - match lifecycle for two-player word duels
//!
//! Each player secretly commits five words, then the players alternate
//! single-word guesses trying to empty the other's list first.
//!
//! # Architecture
//!
//! - **Game**: match data model, errors, rules and invariants
//! - **Registry**: lobby code to match mapping, one lock per match
//! - **Engine**: join, commit, guess and query, each atomic per match
//! - **Lexicon / Suggest**: word validation and closest-word lookup,
//!   kept outside the match state
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use word_duel_core::{Lexicon, MatchEngine, MatchRegistry, MatchRules};
//!
//! # fn example() -> Result<(), word_duel_core::MatchError> {
//! let lexicon = Arc::new(Lexicon::from_words(["apple", "grape", "mango", "lemon", "peach"]));
//! let engine = MatchEngine::new(MatchRegistry::new(), lexicon, MatchRules::default());
//!
//! let id = engine.create_match();
//! let alice = engine.join(&id, "Alice")?;
//! let bob = engine.join(&id, "Bob")?;
//! engine.commit_words(&id, alice, &["apple", "grape", "mango", "lemon", "peach"])?;
//! engine.commit_words(&id, bob, &["peach", "lemon", "mango", "grape", "apple"])?;
//!
//! let result = engine.guess(&id, alice, "mango")?;
//! assert!(*result.correct());
//! assert_eq!(*result.next_turn(), bob);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
pub mod game;
mod lexicon;
mod registry;
mod suggest;

// Crate-level exports - Match engine
pub use engine::MatchEngine;

// Crate-level exports - Registry
pub use registry::{LOBBY_CODE_LEN, MatchHandle, MatchRegistry};

// Crate-level exports - Game types
pub use game::{
    ErrorKind, GuessResult, MAX_PLAYERS, Match, MatchError, MatchId, MatchRules, Phase, Player,
    SECRET_WORD_COUNT, SlotIndex, StateView, opponent,
};

// Crate-level exports - Lexicon and suggestions
pub use lexicon::{Lexicon, LexiconError, normalize};
pub use suggest::{closest, edit_distance};
