//! Text normalization for transcript comparison.
//!
//! Both sides of a comparison go through [`normalize`] before anything else
//! looks at them, so the speech recognizer's formatting choices (capitals,
//! trailing punctuation, curly quotes) never cost the player points.

use unicode_normalization::UnicodeNormalization;

/// The single apostrophe every variant is folded into.
pub const APOSTROPHE: char = '\'';

/// Characters recognizers and authoring tools emit in place of `'`.
const APOSTROPHE_VARIANTS: &[char] = &['\u{2018}', '\u{2019}', '\u{02BC}'];

/// Normalize a string for transcript comparison.
///
/// Applies the following transformations in order:
/// 1. Lowercase
/// 2. Apostrophe variants (`‘`, `’`, `ʼ`) become `'`
/// 3. Unicode NFD decomposition, then everything that is not alphanumeric,
///    `_`, whitespace or `'` is dropped (punctuation and combining marks)
/// 4. Collapse and trim whitespace
///
/// Contractions survive: `"I Don’t know!"` becomes `"i don't know"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if APOSTROPHE_VARIANTS.contains(&c) {
                APOSTROPHE
            } else {
                c
            }
        })
        .nfd()
        .filter(|&c| is_word_char(c) || c.is_whitespace() || c == APOSTROPHE)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split normalized text into its words, discarding empty tokens.
pub fn words(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
