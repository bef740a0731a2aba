//! Accuracy policy: the score a spoken attempt earns against its phrase.
//!
//! Combines three signals:
//!
//! * a **truncation guard** that caps attempts with fewer than half of the
//!   expected words at 30,
//! * **sequential word alignment** (see [`crate::align`]), and
//! * **whole-string Levenshtein similarity**, scaled down by the word-count
//!   ratio so a much shorter or longer attempt cannot ride on it.
//!
//! The score is not symmetric: the guard only looks at how short the *spoken*
//! side is.

use serde::Serialize;

use crate::{
    align::align_sequential,
    corrections::apply_corrections,
    distance::{similarity, to_percent},
    normalize::{normalize, words},
};

/// Attempts with fewer than this fraction of the expected words are truncated.
const TRUNCATION_RATIO: f64 = 0.5;

/// Highest score a truncated attempt can reach.
const TRUNCATED_MAX: f64 = 30.0;

/// Default minimum accuracy for [`find_best_match`].
pub const DEFAULT_MATCH_THRESHOLD: u8 = 60;

/// Which branch of the policy produced the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// Corrected transcript equals the normalized phrase.
    ExactMatch,
    /// Fewer than half of the expected words were spoken.
    Truncated,
    /// Best of sequential alignment and length-adjusted similarity.
    Blended,
}

/// Every intermediate signal of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyBreakdown {
    /// Transcript after normalization and speech corrections.
    pub spoken: String,
    /// Expected phrase after normalization.
    pub expected: String,
    /// Word count of the corrected transcript.
    pub spoken_words: usize,
    /// Word count of the normalized phrase.
    pub expected_words: usize,
    /// Branch of the policy that decided `accuracy`.
    pub rule: ScoringRule,
    /// Aligned coverage as a percentage; only set for [`ScoringRule::Blended`].
    pub sequential_accuracy: Option<f64>,
    /// Whole-string similarity; only set for [`ScoringRule::Blended`].
    pub levenshtein_similarity: Option<u8>,
    /// `min(words) / max(words)`; only set for [`ScoringRule::Blended`].
    pub length_ratio: Option<f64>,
    /// Final score in `0..=100`.
    pub accuracy: u8,
}

/// Score a raw transcript against a raw expected phrase, `0..=100`.
///
/// # Examples
/// ```
/// use solo_score::score_attempt;
///
/// assert_eq!(score_attempt("im fine", "I'm fine."), 100);
/// assert!(score_attempt("hi", "I am very happy to see you today") <= 30);
/// ```
pub fn score_attempt(spoken: &str, expected: &str) -> u8 {
    evaluate(spoken, expected).accuracy
}

/// Score an attempt and keep every intermediate signal.
pub fn evaluate(spoken: &str, expected: &str) -> AccuracyBreakdown {
    let corrected = apply_corrections(spoken);
    let target = normalize(expected);

    let (spoken_count, expected_count) = {
        let s = words(&corrected);
        let e = words(&target);
        (s.len(), e.len())
    };

    let mut breakdown = AccuracyBreakdown {
        spoken: String::new(),
        expected: String::new(),
        spoken_words: spoken_count,
        expected_words: expected_count,
        rule: ScoringRule::ExactMatch,
        sequential_accuracy: None,
        levenshtein_similarity: None,
        length_ratio: None,
        accuracy: 100,
    };

    if corrected == target {
        breakdown.spoken = corrected;
        breakdown.expected = target;
        return breakdown;
    }

    if (spoken_count as f64) < expected_count as f64 * TRUNCATION_RATIO {
        let proportional = spoken_count as f64 / expected_count as f64 * TRUNCATED_MAX;
        breakdown.rule = ScoringRule::Truncated;
        breakdown.accuracy = to_percent(proportional.min(TRUNCATED_MAX));
        breakdown.spoken = corrected;
        breakdown.expected = target;
        return breakdown;
    }

    let sequential = align_sequential(&words(&corrected), &words(&target)) * 100.0;
    let levenshtein = similarity(&corrected, &target);
    let longest = spoken_count.max(expected_count);
    let length_ratio = if longest == 0 {
        0.0
    } else {
        spoken_count.min(expected_count) as f64 / longest as f64
    };
    let adjusted = f64::from(levenshtein) * length_ratio;

    breakdown.rule = ScoringRule::Blended;
    breakdown.sequential_accuracy = Some(sequential);
    breakdown.levenshtein_similarity = Some(levenshtein);
    breakdown.length_ratio = Some(length_ratio);
    breakdown.accuracy = to_percent(sequential.max(adjusted));
    breakdown.spoken = corrected;
    breakdown.expected = target;
    breakdown
}

/// The winning candidate of [`find_best_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestMatch {
    /// Position of the candidate in the input sequence.
    pub index: usize,
    /// Score of the winning candidate.
    pub accuracy: u8,
}

/// Find the candidate phrase the transcript matches best.
///
/// Only candidates scoring at least `threshold` are considered. On a tie the
/// earlier candidate wins.
pub fn find_best_match<'a, I>(spoken: &str, candidates: I, threshold: u8) -> Option<BestMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, phrase)| BestMatch {
            index,
            accuracy: score_attempt(spoken, phrase),
        })
        .filter(|m| m.accuracy >= threshold)
        .fold(None, |best: Option<BestMatch>, m| match best {
            Some(b) if b.accuracy >= m.accuracy => Some(b),
            _ => Some(m),
        })
}
