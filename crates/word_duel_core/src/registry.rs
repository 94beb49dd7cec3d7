//! Registry of live matches keyed by lobby code.

use crate::game::{Match, MatchError, MatchId};
use parking_lot::RwLock;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Length of generated lobby codes.
pub const LOBBY_CODE_LEN: usize = 6;

const LOBBY_CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Shared handle to one match. Each match is its own unit of mutual exclusion.
pub type MatchHandle = Arc<RwLock<Match>>;

/// Manages all matches.
///
/// The map lock is held only while inserting or looking up a handle; all
/// per-match work happens under the match's own lock.
#[derive(Debug, Clone, Default)]
pub struct MatchRegistry {
    matches: Arc<RwLock<HashMap<MatchId, MatchHandle>>>,
}

impl MatchRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating match registry");
        Self::default()
    }

    /// Allocates a new waiting match and returns its lobby code.
    #[instrument(skip(self))]
    pub fn create(&self) -> MatchId {
        let mut matches = self.matches.write();
        let mut rng = rand::thread_rng();

        let id = loop {
            let candidate = generate_code(&mut rng);
            if !matches.contains_key(&candidate) {
                break candidate;
            }
            debug!(code = %candidate, "Lobby code already taken, drawing again");
        };

        matches.insert(id.clone(), Arc::new(RwLock::new(Match::new(id.clone()))));
        info!(match_id = %id, total = matches.len(), "Created new match");
        id
    }

    /// Gets a match by id.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Result<MatchHandle, MatchError> {
        let matches = self.matches.read();
        matches.get(id).cloned().ok_or_else(|| {
            debug!(match_id = id, "Match not found");
            MatchError::NotFound {
                match_id: id.to_string(),
            }
        })
    }

    /// Number of registered matches.
    pub fn len(&self) -> usize {
        self.matches.read().len()
    }

    /// Whether no match has been created yet.
    pub fn is_empty(&self) -> bool {
        self.matches.read().is_empty()
    }

    /// Lists all registered lobby codes.
    #[instrument(skip(self))]
    pub fn ids(&self) -> Vec<MatchId> {
        let ids: Vec<_> = self.matches.read().keys().cloned().collect();
        debug!(count = ids.len(), "Listed matches");
        ids
    }
}

fn generate_code(rng: &mut impl Rng) -> String {
    (0..LOBBY_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..LOBBY_CODE_ALPHABET.len());
            char::from(LOBBY_CODE_ALPHABET[idx])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_use_alphabet() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), LOBBY_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }
}
