//! Match engine: the only code path that mutates match state.
//!
//! Every operation resolves the match through the [`MatchRegistry`], takes
//! that match's lock for the full read-modify-write, and verifies the
//! match invariants before releasing it. A failed operation leaves the match
//! exactly as it found it.

use crate::game::{
    GuessResult, Match, MatchError, MatchRules, Phase, Player, SlotIndex, StateView, invariants,
    normalize_guess, opponent,
};
use crate::lexicon::Lexicon;
use crate::registry::MatchRegistry;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Applies join, commit, guess and query operations to registered matches.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    registry: MatchRegistry,
    lexicon: Arc<Lexicon>,
    rules: MatchRules,
}

impl MatchEngine {
    /// Creates an engine over `registry`, validating secret words against `lexicon`.
    #[instrument(skip(registry, lexicon), fields(lexicon_size = lexicon.len()))]
    pub fn new(registry: MatchRegistry, lexicon: Arc<Lexicon>, rules: MatchRules) -> Self {
        info!(?rules, "Creating match engine");
        Self {
            registry,
            lexicon,
            rules,
        }
    }

    /// Returns the underlying registry.
    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    /// Returns the lexicon used for validation.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Returns the active rules.
    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    /// Creates a new match and returns its lobby code.
    pub fn create_match(&self) -> String {
        self.registry.create()
    }

    /// Adds a player to the match and returns the assigned slot.
    #[instrument(skip(self))]
    pub fn join(&self, match_id: &str, player_name: &str) -> Result<SlotIndex, MatchError> {
        let name = player_name.trim();
        if name.is_empty() {
            warn!(match_id, "Rejected join with empty name");
            return Err(MatchError::EmptyPlayerName);
        }

        self.mutate(match_id, |m| {
            if m.is_full() {
                warn!(match_id, "Match already has 2 players");
                return Err(MatchError::MatchFull);
            }

            let slot = m.push_player(Player::new(name.to_string()));
            info!(match_id, slot, name, phase = %m.phase(), "Player joined");
            Ok(slot)
        })
    }

    /// Commits a player's five secret words, replacing any earlier list.
    ///
    /// # Errors
    ///
    /// - `InvalidSlot` if no player holds `slot`
    /// - `WordsLocked` once the opponent has guessed, or the match has ended
    /// - `InvalidWordCount`, `DuplicateSecretWord`, `UnknownWord`, `BrokenChain`
    ///   for a bad list
    #[instrument(skip(self, words), fields(count = words.len()))]
    pub fn commit_words<S: AsRef<str>>(
        &self,
        match_id: &str,
        slot: SlotIndex,
        words: &[S],
    ) -> Result<(), MatchError> {
        self.mutate(match_id, |m| {
            if m.player(slot).is_none() {
                warn!(match_id, slot, "Commit for unknown slot");
                return Err(MatchError::InvalidSlot { slot });
            }

            let opponent_guessed = m
                .player(opponent(slot))
                .is_some_and(|p| !p.guess_history().is_empty());
            if *m.phase() == Phase::Ended || opponent_guessed {
                warn!(match_id, slot, "Secret words are locked");
                return Err(MatchError::WordsLocked { slot });
            }

            let words = self.rules.validate_secret_words(words, &self.lexicon).inspect_err(|e| {
                warn!(match_id, slot, error = %e, "Rejected secret words");
            })?;

            let player = m.player_mut(slot).ok_or(MatchError::InvalidSlot { slot })?;
            player.set_secret_words(words);
            info!(match_id, slot, committed = m.committed_count(), "Secret words committed");
            Ok(())
        })
    }

    /// Adjudicates a guess by `slot` against the opponent's remaining words.
    ///
    /// Turn passes to the opponent whether or not the guess was correct.
    #[instrument(skip(self))]
    pub fn guess(
        &self,
        match_id: &str,
        slot: SlotIndex,
        word: &str,
    ) -> Result<GuessResult, MatchError> {
        self.mutate(match_id, |m| {
            match m.phase() {
                Phase::Waiting => return Err(MatchError::NotStarted),
                Phase::Ended => return Err(MatchError::MatchEnded),
                Phase::Ready => {}
            }

            let guesser = m.player(slot).ok_or(MatchError::InvalidSlot { slot })?;

            let turn = *m.turn();
            if slot != turn {
                warn!(match_id, slot, turn, "Player tried to guess out of turn");
                return Err(MatchError::NotYourTurn { slot, turn });
            }

            let word = normalize_guess(word)?;
            if guesser.has_guessed(&word) {
                warn!(match_id, slot, word = %word, "Repeated guess");
                return Err(MatchError::DuplicateGuess { word });
            }

            let target = opponent(slot);
            let (correct, depleted) = {
                let defender = m
                    .player_mut(target)
                    .ok_or(MatchError::InvalidSlot { slot: target })?;
                let correct = defender.take_secret(&word);
                (correct, correct && defender.remaining() == 0)
            };

            m.player_mut(slot)
                .ok_or(MatchError::InvalidSlot { slot })?
                .record_guess(word.clone());
            if depleted {
                m.finish(slot);
            }
            m.pass_turn(slot, &word);

            let result = GuessResult::new(correct, *m.turn(), depleted, *m.winner());
            info!(
                match_id,
                slot,
                word = %word,
                correct,
                next_turn = result.next_turn(),
                game_over = depleted,
                "Guess adjudicated"
            );
            Ok(result)
        })
    }

    /// Projects the match for `slot` under a shared lock.
    ///
    /// Pass `None` for an observer view with only the shared fields.
    #[instrument(skip(self))]
    pub fn query_state(
        &self,
        match_id: &str,
        slot: Option<SlotIndex>,
    ) -> Result<StateView, MatchError> {
        let handle = self.registry.get(match_id)?;
        let guard = handle.read();
        let view = StateView::project(&guard, slot);
        debug!(match_id, ?slot, turn = view.turn(), phase = %view.phase(), "State queried");
        Ok(view)
    }

    /// Returns a copy of the full match state.
    pub fn snapshot(&self, match_id: &str) -> Result<Match, MatchError> {
        let handle = self.registry.get(match_id)?;
        let snapshot = handle.read().clone();
        Ok(snapshot)
    }

    /// Runs `op` under the match's exclusive lock, verifying invariants after.
    ///
    /// On any error the match is restored to its state before `op` ran.
    fn mutate<T>(
        &self,
        match_id: &str,
        op: impl FnOnce(&mut Match) -> Result<T, MatchError>,
    ) -> Result<T, MatchError> {
        let handle = self.registry.get(match_id)?;
        let mut guard = handle.write();
        let before = guard.clone();

        let outcome = op(&mut *guard).and_then(|value| {
            invariants::verify(&before, &*guard)
                .inspect_err(|e| error!(match_id, error = %e, "Match invariant violated"))
                .map(|()| value)
        });

        if outcome.is_err() {
            *guard = before;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_engine() -> (MatchEngine, String) {
        let engine = MatchEngine::new(
            MatchRegistry::new(),
            Arc::new(Lexicon::from_words(["apple", "grape"])),
            MatchRules::default(),
        );
        let id = engine.create_match();
        engine.join(&id, "Alice").expect("First join failed");
        engine.join(&id, "Bob").expect("Second join failed");
        (engine, id)
    }

    #[test]
    fn test_invariant_violation_restores_match() {
        let (engine, id) = ready_engine();
        let before = engine.snapshot(&id).expect("Snapshot failed");

        let err = engine
            .mutate(&id, |m| {
                m.force_phase(Phase::Waiting);
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, MatchError::InvariantViolation { .. }));
        assert_eq!(err.kind(), crate::game::ErrorKind::Internal);
        assert_eq!(err.reason(), "invariant_violation");
        assert_eq!(engine.snapshot(&id).expect("Snapshot failed"), before);
    }

    #[test]
    fn test_failed_op_discards_partial_changes() {
        let (engine, id) = ready_engine();
        let before = engine.snapshot(&id).expect("Snapshot failed");

        let result: Result<(), MatchError> = engine.mutate(&id, |m| {
            m.pass_turn(0, "apple");
            Err(MatchError::EmptyWord)
        });

        assert_eq!(result, Err(MatchError::EmptyWord));
        assert_eq!(engine.snapshot(&id).expect("Snapshot failed"), before);
    }
}
