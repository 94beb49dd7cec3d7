//! Closest-word suggestions for typing assistance.
//!
//! Stateless: works only against a [`Lexicon`] and never sees match state.

use crate::lexicon::{Lexicon, normalize};
use tracing::{debug, instrument};

/// Levenshtein distance between `a` and `b`, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Single rolling row of the DP matrix.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag
            } else {
                1 + diag.min(above).min(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Finds the lexicon word closest to `input`.
///
/// Ties go to the word that appears first in the lexicon. Returns `None`
/// for blank input or an empty lexicon.
#[instrument(skip(lexicon), fields(lexicon_size = lexicon.len()))]
pub fn closest<'a>(lexicon: &'a Lexicon, input: &str) -> Option<&'a str> {
    let input = normalize(input);
    if input.is_empty() {
        return None;
    }

    let mut best: Option<(&str, usize)> = None;
    for word in lexicon.iter() {
        let dist = edit_distance(&input, word);
        if best.is_none_or(|(_, min)| dist < min) {
            best = Some((word, dist));
            if dist == 0 {
                break;
            }
        }
    }

    debug!(suggestion = ?best, "Closest word computed");
    best.map(|(word, _)| word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("apple", "apple"), 0);
    }

    #[test]
    fn test_edit_distance_is_symmetric() {
        assert_eq!(edit_distance("grape", "gape"), edit_distance("gape", "grape"));
    }

    #[test]
    fn test_closest_prefers_exact_match() {
        let lexicon = Lexicon::from_words(["apply", "apple", "ample"]);
        assert_eq!(closest(&lexicon, "Apple"), Some("apple"));
    }

    #[test]
    fn test_closest_breaks_ties_by_lexicon_order() {
        let lexicon = Lexicon::from_words(["bat", "cat", "hat"]);
        assert_eq!(closest(&lexicon, "rat"), Some("bat"));
    }

    #[test]
    fn test_closest_empty_cases() {
        let lexicon = Lexicon::from_words(["lemon"]);
        assert_eq!(closest(&lexicon, "   "), None);
        assert_eq!(closest(&Lexicon::default(), "lemon"), None);
    }
}
