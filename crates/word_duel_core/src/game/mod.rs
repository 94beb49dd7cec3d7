//! Word duel match model: types, errors, rules and invariants.

mod error;
pub mod invariants;
mod rules;
mod types;

pub use error::{ErrorKind, MatchError};
pub use rules::{MatchRules, normalize_guess};
pub use types::{
    GuessResult, MAX_PLAYERS, Match, MatchId, Phase, Player, SECRET_WORD_COUNT, SlotIndex,
    StateView, opponent,
};
