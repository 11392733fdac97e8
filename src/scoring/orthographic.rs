//! Orthographic similarity of identifier strings
//!
//! Position-aligned character comparison: the two names are zipped left to
//! right up to the shorter length, with no insertion/deletion alignment.
//! Exact character matches score 1; differing characters fall back to the
//! lexicon's congruence score for that pair (0 when the pair was never
//! trained, e.g. punctuation). Each trailing character of the longer name
//! costs a full point, and the total is normalized by both lengths:
//!
//! ```text
//! (matches - (longer - shorter)) / shorter / longer
//! ```
//!
//! The double normalization means identical names score `1/len`, not 1.0,
//! and very dissimilar or very differently-sized names can go negative.
//! Those are the intended reference semantics; thresholds are calibrated
//! against them.

use super::ScoreError;
use crate::lexicon::Lexicon;

/// Score the orthographic similarity of two non-empty identifiers.
///
/// Fails with [`ScoreError::EmptyIdentifier`] if either name is empty.
/// Symmetric because the lexicon stores both key orderings.
pub fn score(name1: &str, name2: &str, lexicon: &Lexicon) -> Result<f64, ScoreError> {
    let chars1: Vec<char> = name1.chars().collect();
    let chars2: Vec<char> = name2.chars().collect();

    if chars1.is_empty() || chars2.is_empty() {
        return Err(ScoreError::EmptyIdentifier);
    }

    let shorter = chars1.len().min(chars2.len());
    let longer = chars1.len().max(chars2.len());

    let mut sum = 0.0;
    for i in 0..shorter {
        if chars1[i] == chars2[i] {
            sum += 1.0;
        } else if let Some(congruence) = lexicon.get(chars1[i], chars2[i]) {
            sum += congruence;
        }
    }

    Ok((sum - (longer - shorter) as f64) / shorter as f64 / longer as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon_with(entries: &[(char, char, f64)]) -> Lexicon {
        let mut lexicon = Lexicon::new();
        for &(a, b, s) in entries {
            lexicon.insert_pair(a, b, s);
        }
        lexicon
    }

    #[test]
    fn test_substitutes_lexicon_score_for_mismatches() {
        // 'c' vs 'b' pulls from the lexicon; 'a' and 't' match exactly
        let lexicon = lexicon_with(&[('c', 'b', 0.5)]);
        let s = score("cat", "bat", &lexicon).unwrap();
        assert!((s - (2.0 + 0.5) / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_untrained_pair_contributes_zero() {
        let lexicon = Lexicon::new();
        let s = score("cat", "bat", &lexicon).unwrap();
        assert!((s - 2.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_difference_penalty() {
        // Two exact matches minus two trailing chars: zero on the nose
        let lexicon = Lexicon::new();
        let s = score("ab", "abcd", &lexicon).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_identical_names_score_reciprocal_length() {
        // The literal formula gives 1/len for identical names, not 1.0
        let lexicon = Lexicon::new();
        let s = score("cat", "cat", &lexicon).unwrap();
        assert!((s - 1.0 / 3.0).abs() < 1e-12);

        let s = score("x", "x", &lexicon).unwrap();
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_score_is_symmetric() {
        let lexicon = lexicon_with(&[('E', 'F', 0.97), ('l', 'I', 0.9)]);
        let a = score("Elf", "Fl1", &lexicon).unwrap();
        let b = score("Fl1", "Elf", &lexicon).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_can_go_negative_for_dissimilar_lengths() {
        let lexicon = Lexicon::new();
        let s = score("a", "completely", &lexicon).unwrap();
        assert!(s < 0.0);
    }

    #[test]
    fn test_empty_identifier_is_an_error() {
        let lexicon = Lexicon::new();
        assert_eq!(
            score("", "abc", &lexicon),
            Err(ScoreError::EmptyIdentifier)
        );
        assert_eq!(
            score("abc", "", &lexicon),
            Err(ScoreError::EmptyIdentifier)
        );
    }
}
