//! XP awarded for a single attempt.

use std::time::Duration;

/// Answers faster than this many seconds earn a speed bonus.
const SPEED_BONUS_SECONDS: f64 = 5.0;

/// Consecutive correct answers needed for the streak multiplier.
pub const STREAK_BONUS_AFTER: u32 = 5;

const STREAK_MULTIPLIER: f64 = 1.2;
const DAILY_CHALLENGE_MULTIPLIER: f64 = 1.25;

/// Compute the XP earned by one attempt.
///
/// # Arguments
///
/// * `accuracy` - Score of the attempt, `0..=100`
/// * `response_time` - Time between the prompt and the answer
/// * `consecutive_correct` - Streak of passing answers, including this one
/// * `is_daily_challenge` - Whether the attempt belongs to the daily challenge
///
/// # Algorithm
///
/// * base: `accuracy / 10`, rounded
/// * speed bonus: one point per second under 5 seconds, rounded, never negative
/// * ×1.2 once `consecutive_correct` reaches 5
/// * ×1.25 for the daily challenge
pub fn compute_xp(
    accuracy: u8,
    response_time: Duration,
    consecutive_correct: u32,
    is_daily_challenge: bool,
) -> u32 {
    let base = (f64::from(accuracy) / 10.0).round();
    let speed_bonus = (SPEED_BONUS_SECONDS - response_time.as_secs_f64())
        .round()
        .max(0.0);
    let streak_multiplier = if consecutive_correct >= STREAK_BONUS_AFTER {
        STREAK_MULTIPLIER
    } else {
        1.0
    };
    let daily_multiplier = if is_daily_challenge {
        DAILY_CHALLENGE_MULTIPLIER
    } else {
        1.0
    };

    ((base + speed_bonus) * streak_multiplier * daily_multiplier).round() as u32
}
