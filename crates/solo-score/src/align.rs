//! Sequential word alignment.
//!
//! Whole-string similarity alone can be gamed by repeating a short fragment
//! of the phrase. The aligner only credits spoken words that appear in the
//! expected order, and each expected word can be credited once.

use crate::distance::levenshtein;

/// Expected words longer than this tolerate two edits instead of one.
const LONG_WORD_LEN: usize = 4;

/// Maximum edit distance at which `expected` still accepts a spoken word.
pub fn word_threshold(expected: &str) -> usize {
    if expected.chars().count() > LONG_WORD_LEN {
        2
    } else {
        1
    }
}

/// Fraction of `expected` words matched, in order, by `spoken` words.
///
/// Each spoken word scans forward from the position after the last match and
/// claims the first unclaimed expected word within [`word_threshold`]. Spoken
/// words with no match are skipped without moving the cursor. Words said
/// after the cursor has already passed them are not credited.
///
/// Returns a value in `0.0..=1.0`; an empty `expected` yields `0.0`.
pub fn align_sequential(spoken: &[&str], expected: &[&str]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }

    let mut claimed = vec![false; expected.len()];
    let mut cursor = 0;
    let mut matched = 0usize;

    for word in spoken {
        let hit = (cursor..expected.len()).find(|&j| {
            !claimed[j] && levenshtein(word, expected[j]) <= word_threshold(expected[j])
        });

        if let Some(j) = hit {
            claimed[j] = true;
            cursor = j + 1;
            matched += 1;
        }
    }

    matched as f64 / expected.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_threshold() {
        assert_eq!(word_threshold("i"), 1);
        assert_eq!(word_threshold("fine"), 1);
        assert_eq!(word_threshold("hello"), 2);
        assert_eq!(word_threshold("station"), 2);
    }

    #[test]
    fn test_full_coverage() {
        let words = ["see", "you", "later"];
        assert_eq!(align_sequential(&words, &words), 1.0);
    }

    #[test]
    fn test_fuzzy_words() {
        // "helo" is one edit from "hello", "wrld" one edit from "world"
        assert_eq!(align_sequential(&["helo", "wrld"], &["hello", "world"]), 1.0);
        // "fin" is one edit from "fine"; "fi" is two, and "fine" is short
        assert_eq!(align_sequential(&["i'm", "fin"], &["i'm", "fine"]), 1.0);
        assert_eq!(align_sequential(&["i'm", "fi"], &["i'm", "fine"]), 0.5);
    }

    #[test]
    fn test_repetition_claims_once() {
        let spoken = ["i", "am", "i", "am", "i", "am"];
        let expected = ["i", "am", "very", "tired", "and", "hungry", "today"];
        let coverage = align_sequential(&spoken, &expected);
        assert!((coverage - 2.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_order_not_credited() {
        // "morning" moves the cursor past "good"
        assert_eq!(align_sequential(&["morning", "good"], &["good", "morning"]), 0.5);
    }

    #[test]
    fn test_unmatched_words_skipped() {
        let coverage = align_sequential(&["um", "thank", "uh", "you"], &["thank", "you"]);
        assert_eq!(coverage, 1.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(align_sequential(&[], &["hello"]), 0.0);
        assert_eq!(align_sequential(&["hello"], &[]), 0.0);
        assert_eq!(align_sequential(&[], &[]), 0.0);
    }
}
