//! Tests for the match registry and per-match locking.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use word_duel_core::{
    LOBBY_CODE_LEN, Lexicon, MatchEngine, MatchError, MatchRegistry, MatchRules, Phase,
};

#[test]
fn test_create_then_get() {
    let registry = MatchRegistry::new();
    assert!(registry.is_empty());

    let id = registry.create();
    assert_eq!(id.len(), LOBBY_CODE_LEN);

    let handle = registry.get(&id).expect("Match should exist");
    let m = handle.read();
    assert_eq!(m.id(), &id);
    assert_eq!(*m.phase(), Phase::Waiting);
    assert!(m.players().is_empty());
}

#[test]
fn test_get_unknown_match() {
    let registry = MatchRegistry::new();
    let err = registry.get("zzzzzz").unwrap_err();
    assert_eq!(
        err,
        MatchError::NotFound {
            match_id: "zzzzzz".to_string()
        }
    );
}

#[test]
fn test_ids_are_unique() {
    let registry = MatchRegistry::new();
    let ids: HashSet<_> = (0..500).map(|_| registry.create()).collect();
    assert_eq!(ids.len(), 500);
    assert_eq!(registry.len(), 500);
    assert_eq!(registry.ids().into_iter().collect::<HashSet<_>>(), ids);
}

#[test]
fn test_clones_share_matches() {
    let registry = MatchRegistry::new();
    let other = registry.clone();
    let id = registry.create();
    assert!(other.get(&id).is_ok());
}

#[test]
fn test_concurrent_creates_are_unique() {
    let registry = MatchRegistry::new();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || (0..50).map(|_| registry.create()).collect::<Vec<_>>())
        })
        .collect();

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("Thread panicked") {
            assert!(all.insert(id), "Duplicate lobby code issued");
        }
    }
    assert_eq!(registry.len(), 400);
}

#[test]
fn test_concurrent_joins_fill_exactly_two_slots() {
    let engine = MatchEngine::new(
        MatchRegistry::new(),
        Arc::new(Lexicon::default()),
        MatchRules::default(),
    );
    let id = engine.create_match();
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|n| {
            let engine = engine.clone();
            let id = id.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.join(&id, &format!("player{n}"))
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    let mut slots: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();
    slots.sort_unstable();
    assert_eq!(slots, vec![0, 1]);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(MatchError::MatchFull)))
            .count(),
        4
    );
}

#[test]
fn test_simultaneous_guesses_accept_only_turn_holder() {
    let words = ["apple", "grape", "mango", "lemon", "peach"];
    let engine = MatchEngine::new(
        MatchRegistry::new(),
        Arc::new(Lexicon::from_words(words)),
        MatchRules::default(),
    );

    for _ in 0..50 {
        let id = engine.create_match();
        engine.join(&id, "Alice").unwrap();
        engine.join(&id, "Bob").unwrap();
        engine.commit_words(&id, 0, &words).unwrap();
        engine.commit_words(&id, 1, &words).unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|slot| {
                let engine = engine.clone();
                let id = id.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    engine.guess(&id, slot, "mango")
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("Thread panicked"))
            .collect();

        // Slot 1 only gets in if slot 0 already moved; never both out of order.
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        assert!(accepted >= 1);
        assert!(results[0].is_ok());
        match &results[1] {
            Ok(result) => assert_eq!(*result.next_turn(), 0),
            Err(err) => assert_eq!(*err, MatchError::NotYourTurn { slot: 1, turn: 0 }),
        }

        let snapshot = engine.snapshot(&id).unwrap();
        let total_guesses: usize = snapshot
            .players()
            .iter()
            .map(|p| p.guess_history().len())
            .sum();
        assert_eq!(total_guesses, accepted);
        assert_eq!(*snapshot.turn(), accepted % 2);
    }
}
