//! First-class invariants for word duel matches.
//!
//! State invariants must hold for every match at rest. Transition invariants
//! relate a match before and after a single engine operation. The engine
//! checks both after every mutation and refuses to publish a state that
//! fails either.

use super::error::MatchError;
use super::types::{MAX_PLAYERS, Match, Phase, SECRET_WORD_COUNT};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A property relating the state before and after one operation.
pub trait TransitionInvariant<S> {
    /// Checks if the invariant holds across the transition.
    fn holds(before: &S, after: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Invariant: at most two players, and the phase agrees with the head count.
pub struct PlayerCapacity;

impl Invariant<Match> for PlayerCapacity {
    fn holds(m: &Match) -> bool {
        let count = m.players().len();
        count <= MAX_PLAYERS
            && match m.phase() {
                Phase::Waiting => count < MAX_PLAYERS,
                Phase::Ready | Phase::Ended => count == MAX_PLAYERS,
            }
    }

    fn description() -> &'static str {
        "At most two players; waiting iff fewer than two"
    }
}

/// Invariant: no player holds more than five secret words.
pub struct SecretWordBound;

impl Invariant<Match> for SecretWordBound {
    fn holds(m: &Match) -> bool {
        m.players()
            .iter()
            .all(|p| p.remaining() <= SECRET_WORD_COUNT && (*p.committed() || p.remaining() == 0))
    }

    fn description() -> &'static str {
        "Secret word lists hold at most five words and only once committed"
    }
}

/// Invariant: in the ready phase the turn points at an occupied slot.
pub struct TurnOccupied;

impl Invariant<Match> for TurnOccupied {
    fn holds(m: &Match) -> bool {
        *m.phase() != Phase::Ready || m.player(*m.turn()).is_some()
    }

    fn description() -> &'static str {
        "Turn refers to an occupied slot while ready"
    }
}

/// Invariant: a winner exists exactly when the match has ended, and the
/// loser's list is empty.
pub struct WinnerIffEnded;

impl Invariant<Match> for WinnerIffEnded {
    fn holds(m: &Match) -> bool {
        match (m.phase(), m.winner()) {
            (Phase::Ended, Some(winner)) => m
                .player(super::types::opponent(*winner))
                .is_some_and(|loser| loser.remaining() == 0),
            (Phase::Ended, None) => false,
            (_, winner) => winner.is_none(),
        }
    }

    fn description() -> &'static str {
        "Winner is set if and only if the match has ended"
    }
}

/// Transition: phase never moves backward.
pub struct PhaseForward;

impl TransitionInvariant<Match> for PhaseForward {
    fn holds(before: &Match, after: &Match) -> bool {
        after.phase() >= before.phase()
    }

    fn description() -> &'static str {
        "Phase only moves forward"
    }
}

/// Transition: existing players keep their slot, name and guess history prefix.
pub struct SlotsStable;

impl TransitionInvariant<Match> for SlotsStable {
    fn holds(before: &Match, after: &Match) -> bool {
        after.id() == before.id()
            && after.players().len() >= before.players().len()
            && before.players().iter().zip(after.players()).all(|(b, a)| {
                a.name() == b.name() && a.guess_history().starts_with(b.guess_history())
            })
    }

    fn description() -> &'static str {
        "Slots are stable and guess histories append-only"
    }
}

/// Transition: secret words are either replaced wholesale by a fresh
/// commitment of five, or shrink by removal only.
pub struct SecretWordsMonotonic;

impl TransitionInvariant<Match> for SecretWordsMonotonic {
    fn holds(before: &Match, after: &Match) -> bool {
        before.players().iter().zip(after.players()).all(|(b, a)| {
            let (old, new) = (b.secret_words(), a.secret_words());
            if old == new {
                return true;
            }
            let recommitted = new.len() == SECRET_WORD_COUNT
                && b.guess_history().len() == a.guess_history().len();
            let shrunk = new.len() < old.len() && new.iter().all(|w| old.contains(w));
            recommitted || shrunk
        })
    }

    fn description() -> &'static str {
        "Secret words are committed as five, then only removed"
    }
}

fn check<I: Invariant<Match>>(m: &Match, violations: &mut Vec<&'static str>) {
    if !I::holds(m) {
        warn!(match_id = %m.id(), invariant = I::description(), "Invariant violated");
        violations.push(I::description());
    }
}

fn check_transition<I: TransitionInvariant<Match>>(
    before: &Match,
    after: &Match,
    violations: &mut Vec<&'static str>,
) {
    if !I::holds(before, after) {
        warn!(
            match_id = %after.id(),
            invariant = I::description(),
            "Transition invariant violated"
        );
        violations.push(I::description());
    }
}

/// Checks every state and transition invariant for one operation.
pub fn verify(before: &Match, after: &Match) -> Result<(), MatchError> {
    let mut violations = Vec::new();

    check::<PlayerCapacity>(after, &mut violations);
    check::<SecretWordBound>(after, &mut violations);
    check::<TurnOccupied>(after, &mut violations);
    check::<WinnerIffEnded>(after, &mut violations);

    check_transition::<PhaseForward>(before, after, &mut violations);
    check_transition::<SlotsStable>(before, after, &mut violations);
    check_transition::<SecretWordsMonotonic>(before, after, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(MatchError::InvariantViolation {
            detail: format!("Postcondition failed: {}", violations.join("; ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Player;

    fn ready_match() -> Match {
        let mut m = Match::new("abc123".to_string());
        m.push_player(Player::new("Alice".to_string()));
        m.push_player(Player::new("Bob".to_string()));
        m
    }

    #[test]
    fn test_fresh_match_holds() {
        let m = Match::new("abc123".to_string());
        assert!(verify(&m, &m).is_ok());
    }

    #[test]
    fn test_ready_match_holds() {
        let before = Match::new("abc123".to_string());
        let after = ready_match();
        assert!(verify(&before, &after).is_ok());
    }

    #[test]
    fn test_phase_regression_detected() {
        let before = ready_match();
        let mut after = before.clone();
        after.force_phase(Phase::Waiting);
        assert!(!PhaseForward::holds(&before, &after));
        assert!(matches!(
            verify(&before, &after),
            Err(MatchError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_ended_without_winner_detected() {
        let mut m = ready_match();
        m.force_phase(Phase::Ended);
        assert!(!WinnerIffEnded::holds(&m));
    }

    #[test]
    fn test_rewritten_history_detected() {
        let before = {
            let mut m = ready_match();
            if let Some(p) = m.player_mut(0) {
                p.record_guess("apple".to_string());
            }
            m
        };
        let after = ready_match();
        assert!(!SlotsStable::holds(&before, &after));
    }
}
