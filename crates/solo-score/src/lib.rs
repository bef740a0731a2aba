//! Pronunciation scoring for Solo Speak.
//!
//! This crate decides how close a speech-to-text transcript is to the phrase
//! the player was asked to say, and turns that accuracy into XP. Everything
//! is a pure, synchronous function, so it is safe to call from any thread or
//! async task.
//!
//! ```
//! use std::time::Duration;
//!
//! use solo_score::{compute_xp, score_attempt};
//!
//! let accuracy = score_attempt("i am looking for the train station", "I'm looking for the train station.");
//! assert_eq!(accuracy, 100);
//!
//! let xp = compute_xp(accuracy, Duration::from_millis(2500), 1, false);
//! assert_eq!(xp, 13);
//! ```

pub mod accuracy;
pub mod align;
pub mod corrections;
pub mod distance;
pub mod normalize;
pub mod progression;
pub mod xp;

pub use accuracy::{AccuracyBreakdown, BestMatch, ScoringRule, evaluate, find_best_match, score_attempt};
pub use corrections::apply_corrections;
pub use distance::{levenshtein, similarity};
pub use normalize::normalize;
pub use progression::{
    ACCURACY_THRESHOLD, ActivityProgress, ActivityRun, Difficulty, Feedback, LevelProgress, Mode,
    PlayerProgress, XpLevel, xp_level,
};
pub use xp::compute_xp;
