//! Core domain types for a word duel match.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Lobby code identifying a match.
pub type MatchId = String;

/// A player's permanent position within a match (0 or 1).
pub type SlotIndex = usize;

/// Maximum number of players in a match.
pub const MAX_PLAYERS: usize = 2;

/// Number of secret words each player commits.
pub const SECRET_WORD_COUNT: usize = 5;

/// Returns the slot facing `slot` in a two-player match.
pub fn opponent(slot: SlotIndex) -> SlotIndex {
    1 - slot.min(1)
}

/// Lifecycle phase of a match. Ordering follows the only legal direction of travel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Fewer than two players have joined.
    Waiting,
    /// Both players joined; words may be committed and guesses made.
    Ready,
    /// A winner has been determined.
    Ended,
}

/// One side of a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Player {
    /// Display name given at join.
    name: String,
    /// Remaining secret words, in commit order.
    secret_words: Vec<String>,
    /// Words this player has guessed, oldest first.
    guess_history: Vec<String>,
    /// Whether a secret word list has been accepted for this player.
    committed: bool,
}

impl Player {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            secret_words: Vec::new(),
            guess_history: Vec::new(),
            committed: false,
        }
    }

    /// Number of secret words the opponent still has to find.
    pub fn remaining(&self) -> usize {
        self.secret_words.len()
    }

    /// Whether this player has already guessed `word` (normalized form).
    pub fn has_guessed(&self, word: &str) -> bool {
        self.guess_history.iter().any(|w| w == word)
    }

    pub(crate) fn set_secret_words(&mut self, words: Vec<String>) {
        self.secret_words = words;
        self.committed = true;
    }

    /// Removes `word` from the secret list. Returns whether it was present.
    pub(crate) fn take_secret(&mut self, word: &str) -> bool {
        match self.secret_words.iter().position(|w| w == word) {
            Some(idx) => {
                self.secret_words.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn record_guess(&mut self, word: String) {
        self.guess_history.push(word);
    }
}

/// Full state of one lobby.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct Match {
    /// Lobby code.
    id: MatchId,
    /// Players in join order; index is the slot.
    players: Vec<Player>,
    /// Current phase.
    phase: Phase,
    /// Slot allowed to guess next.
    turn: SlotIndex,
    /// Final letter of the most recent guess by either side.
    last_guessed_letter: Option<char>,
    /// Winning slot, present only once the match has ended.
    winner: Option<SlotIndex>,
}

impl Match {
    /// Creates an empty match waiting for players.
    pub fn new(id: MatchId) -> Self {
        Self {
            id,
            players: Vec::with_capacity(MAX_PLAYERS),
            phase: Phase::Waiting,
            turn: 0,
            last_guessed_letter: None,
            winner: None,
        }
    }

    /// Gets the player in `slot`, if joined.
    pub fn player(&self, slot: SlotIndex) -> Option<&Player> {
        self.players.get(slot)
    }

    pub(crate) fn player_mut(&mut self, slot: SlotIndex) -> Option<&mut Player> {
        self.players.get_mut(slot)
    }

    /// Whether two players have joined.
    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Number of players with a committed word list.
    pub fn committed_count(&self) -> usize {
        self.players.iter().filter(|p| p.committed).count()
    }

    /// Appends a player and returns the assigned slot. Caller checks capacity.
    pub(crate) fn push_player(&mut self, player: Player) -> SlotIndex {
        self.players.push(player);
        if self.is_full() {
            self.phase = Phase::Ready;
        }
        self.players.len() - 1
    }

    pub(crate) fn pass_turn(&mut self, from: SlotIndex, word: &str) {
        self.turn = opponent(from);
        if let Some(last) = word.chars().last() {
            self.last_guessed_letter = Some(last);
        }
    }

    pub(crate) fn finish(&mut self, winner: SlotIndex) {
        self.phase = Phase::Ended;
        self.winner = Some(winner);
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

/// Outcome of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, derive_new::new)]
pub struct GuessResult {
    /// Whether the word was one of the opponent's remaining secret words.
    correct: bool,
    /// Slot that guesses next.
    next_turn: SlotIndex,
    /// Whether this guess ended the match.
    game_over: bool,
    /// Winner, when the match has ended.
    winner: Option<SlotIndex>,
}

/// Read-only projection of a match for one requester.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct StateView {
    /// Lobby code.
    match_id: MatchId,
    /// Current phase.
    phase: Phase,
    /// Slot allowed to guess next.
    turn: SlotIndex,
    /// Final letter of the most recent guess.
    last_guessed_letter: Option<char>,
    /// Number of joined players.
    players_ready: usize,
    /// Number of players with committed words.
    players_committed: usize,
    /// Winner, once the match has ended.
    winner: Option<SlotIndex>,
    /// Requester's guesses, oldest first. Empty for an unknown slot.
    your_guesses: Vec<String>,
    /// Opponent's guesses, oldest first. Empty for an unknown slot.
    opponent_guesses: Vec<String>,
    /// Requester's remaining secret words.
    remaining_words: Option<usize>,
    /// Opponent's remaining secret words.
    opponent_remaining: Option<usize>,
    /// Opponent's display name, once joined.
    opponent_name: Option<String>,
}

impl StateView {
    /// Projects `m` from the point of view of `slot`.
    ///
    /// With no slot, or a slot nobody occupies, only the shared fields are filled.
    pub fn project(m: &Match, slot: Option<SlotIndex>) -> Self {
        let me = slot.and_then(|slot| m.player(slot));
        let them = slot.and_then(|slot| me.and_then(|_| m.player(opponent(slot))));

        Self {
            match_id: m.id.clone(),
            phase: m.phase,
            turn: m.turn,
            last_guessed_letter: m.last_guessed_letter,
            players_ready: m.players.len(),
            players_committed: m.committed_count(),
            winner: m.winner,
            your_guesses: me.map(|p| p.guess_history.clone()).unwrap_or_default(),
            opponent_guesses: them.map(|p| p.guess_history.clone()).unwrap_or_default(),
            remaining_words: me.map(Player::remaining),
            opponent_remaining: them.map(Player::remaining),
            opponent_name: them.map(|p| p.name.clone()),
        }
    }
}
