//! Speech-recognizer correction table.
//!
//! Recognizers routinely drop apostrophes ("im") or expand contractions
//! ("i am") where the lesson text is written contracted ("I'm"). Rewriting
//! those forms back to the contraction before scoring keeps a correctly
//! spoken phrase at 100.

use std::sync::LazyLock;

use crate::normalize::{normalize, words};

/// A canonical contracted form and the transcriptions that stand for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction {
    /// Contracted spelling used by the lesson content.
    pub canonical: &'static str,
    /// Normalized transcriptions rewritten to `canonical`.
    pub variants: &'static [&'static str],
}

const fn entry(canonical: &'static str, variants: &'static [&'static str]) -> Correction {
    Correction {
        canonical,
        variants,
    }
}

/// Every known correction, in precedence order.
///
/// Note that `"well"` is rewritten to `"we'll"` even when it was meant as the
/// adverb. Lesson content relies on that rewrite, so it stays.
pub static CORRECTION_TABLE: &[Correction] = &[
    entry("i'm", &["im", "i am", "am"]),
    entry("i've", &["ive", "i have"]),
    entry("i'll", &["ill", "i will", "i well"]),
    entry("i'd", &["id", "i would", "i had"]),
    entry("you're", &["youre", "you are", "your"]),
    entry("you've", &["youve", "you have"]),
    entry("you'll", &["youll", "you will"]),
    entry("we're", &["were", "we are"]),
    entry("we've", &["weve", "we have"]),
    entry("we'll", &["well", "we will"]),
    entry("they're", &["theyre", "they are", "their", "there"]),
    entry("they've", &["theyve", "they have"]),
    entry("they'll", &["theyll", "they will"]),
    entry("it's", &["its", "it is"]),
    entry("that's", &["thats", "that is"]),
    entry("what's", &["whats", "what is"]),
    entry("there's", &["theres", "there is"]),
    entry("here's", &["heres", "here is"]),
    entry("let's", &["lets", "let us"]),
    entry("don't", &["dont", "do not"]),
    entry("doesn't", &["doesnt", "does not"]),
    entry("didn't", &["didnt", "did not"]),
    entry("won't", &["wont", "will not"]),
    entry("wouldn't", &["wouldnt", "would not"]),
    entry("couldn't", &["couldnt", "could not"]),
    entry("shouldn't", &["shouldnt", "should not"]),
    entry("can't", &["cant", "cannot", "can not"]),
    entry("isn't", &["isnt", "is not"]),
    entry("aren't", &["arent", "are not"]),
    entry("wasn't", &["wasnt", "was not"]),
    entry("weren't", &["werent", "were not"]),
    entry("haven't", &["havent", "have not"]),
    entry("hasn't", &["hasnt", "has not"]),
    entry("hadn't", &["hadnt", "had not"]),
];

/// A variant split into words, flattened out of [`CORRECTION_TABLE`].
struct Rule {
    canonical: &'static str,
    words: Vec<&'static str>,
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    CORRECTION_TABLE
        .iter()
        .flat_map(|correction| {
            correction.variants.iter().map(|variant| Rule {
                canonical: correction.canonical,
                words: variant.split(' ').collect(),
            })
        })
        .collect()
});

/// Normalize `text` and rewrite known mis-transcriptions to their canonical
/// contracted form.
///
/// Matching works on whole words, left to right. At each word the first rule
/// in table order whose words match wins, and the rewritten words are never
/// looked at again. Canonical forms all contain an apostrophe and no variant
/// does, so running this twice gives the same result as running it once.
pub fn apply_corrections(text: &str) -> String {
    let normalized = normalize(text);
    let tokens = words(&normalized);

    let mut corrected: Vec<&str> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let rest = &tokens[i..];
        match RULES.iter().find(|rule| rest.starts_with(&rule.words)) {
            Some(rule) => {
                corrected.push(rule.canonical);
                i += rule.words.len();
            }
            None => {
                corrected.push(tokens[i]);
                i += 1;
            }
        }
    }

    corrected.join(" ")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn corrections_are_idempotent(text in "\\PC{0,64}") {
            let once = apply_corrections(&text);
            prop_assert_eq!(apply_corrections(&once), once);
        }

        #[test]
        fn corrections_are_idempotent_on_table_words(
            picks in proptest::collection::vec(0usize..12, 0..10)
        ) {
            const VOCAB: &[&str] = &[
                "i", "am", "there", "is", "well", "we", "will", "not", "were", "you", "are", "theres",
            ];
            let text = picks.iter().map(|&i| VOCAB[i]).collect::<Vec<_>>().join(" ");
            let once = apply_corrections(&text);
            prop_assert_eq!(apply_corrections(&once), once);
        }
    }
}
