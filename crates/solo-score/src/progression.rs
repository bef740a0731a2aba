//! Player progression: pass/fail gating, levels, the daily streak and
//! per-activity completion.
//!
//! Everything here is a pure function over explicit values; storing the
//! progress between sessions is the caller's job.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minimum accuracy for an attempt to count as correct.
pub const ACCURACY_THRESHOLD: u8 = 75;

/// XP needed to go up one level.
pub const XP_PER_LEVEL: u32 = 500;

/// Activities offered for each mode and difficulty.
pub const ACTIVITIES_PER_LEVEL: u32 = 50;

/// Phrases played in one activity.
pub const PHRASES_PER_ACTIVITY: u8 = 10;

/// Accuracy above which an attempt is rated excellent.
const EXCELLENT_ABOVE: u8 = 90;

/// Whether `accuracy` passes the given threshold.
pub const fn is_passing(accuracy: u8, threshold: u8) -> bool {
    accuracy >= threshold
}

/// Consecutive-correct counter after an attempt.
pub const fn next_consecutive(previous: u32, passed: bool) -> u32 {
    if passed { previous.saturating_add(1) } else { 0 }
}

/// Feedback tier shown for an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Passed with more than 90.
    Excellent,
    /// Passed.
    Correct,
    /// Below the pass threshold.
    AlmostThere,
}

impl Feedback {
    /// Tier for an accuracy, judged against the default pass threshold.
    pub const fn for_accuracy(accuracy: u8) -> Self {
        Self::with_threshold(accuracy, ACCURACY_THRESHOLD)
    }

    /// Tier for an accuracy judged against a custom pass threshold.
    ///
    /// A failing attempt is never excellent, even above 90.
    pub const fn with_threshold(accuracy: u8, threshold: u8) -> Self {
        if !is_passing(accuracy, threshold) {
            Self::AlmostThere
        } else if accuracy > EXCELLENT_ABOVE {
            Self::Excellent
        } else {
            Self::Correct
        }
    }
}

/// Level reached with `total_xp`; levels start at 1.
pub const fn level_for_xp(total_xp: u32) -> u32 {
    total_xp / XP_PER_LEVEL + 1
}

/// Level and progress toward the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XpLevel {
    /// Current level, starting at 1.
    pub level: u32,
    /// Percentage of the current level completed, `0.0..100.0`.
    pub progress: f64,
    /// Total XP at which the next level starts.
    pub next_level_xp: u32,
}

/// Describe where `total_xp` sits in the level ladder.
pub fn xp_level(total_xp: u32) -> XpLevel {
    let level = level_for_xp(total_xp);
    let level_start = (level - 1) * XP_PER_LEVEL;

    XpLevel {
        level,
        progress: f64::from(total_xp - level_start) / f64::from(XP_PER_LEVEL) * 100.0,
        next_level_xp: level.saturating_mul(XP_PER_LEVEL),
    }
}

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Repeat single phrases.
    Phrases,
    /// Answer the opening line of a dialogue.
    Dialogues,
}

/// Difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Beginner content.
    Easy,
    /// Intermediate content.
    Medium,
    /// Full sentences and dialogues.
    Advanced,
}

/// Best result recorded for one activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityProgress {
    /// Every phrase of the activity was passed in one run.
    pub completed: bool,
    /// The activity was played at least once.
    pub started: bool,
    /// Highest average accuracy of any run.
    pub best_accuracy: u8,
    /// Most phrases passed in any run, `0..=10`.
    pub phrases_completed: u8,
}

/// Outcome of one run through an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityRun {
    /// Average accuracy over the phrases played.
    pub accuracy: u8,
    /// Phrases passed during the run.
    pub phrases_completed: u8,
    /// Whether every phrase was passed.
    pub fully_completed: bool,
}

/// Activity results for one mode and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Results keyed by 1-based activity number.
    #[serde(default)]
    pub activities: BTreeMap<u32, ActivityProgress>,
    /// Number of completed activities.
    #[serde(default)]
    pub completed: u32,
    /// Number of activities on offer.
    #[serde(default = "default_total")]
    pub total: u32,
}

const fn default_total() -> u32 {
    ACTIVITIES_PER_LEVEL
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self {
            activities: BTreeMap::new(),
            completed: 0,
            total: ACTIVITIES_PER_LEVEL,
        }
    }
}

impl LevelProgress {
    /// Result recorded for an activity, if it was ever played.
    pub fn activity(&self, activity_id: u32) -> Option<&ActivityProgress> {
        self.activities.get(&activity_id)
    }

    /// Fold one run into the activity's record.
    ///
    /// A full completion replaces the record only when there is none yet or
    /// the run beats the best accuracy, so a weaker replay never undoes it. A
    /// partial run marks the activity as started but not completed and keeps
    /// the best accuracy and phrase count seen so far.
    pub fn record(&mut self, activity_id: u32, run: ActivityRun) {
        let current = self.activities.get(&activity_id).copied();

        if run.fully_completed {
            if current.is_none_or(|c| run.accuracy > c.best_accuracy) {
                self.activities.insert(
                    activity_id,
                    ActivityProgress {
                        completed: true,
                        started: true,
                        best_accuracy: run.accuracy,
                        phrases_completed: PHRASES_PER_ACTIVITY,
                    },
                );
            }
        } else {
            let phrases = run.phrases_completed.min(PHRASES_PER_ACTIVITY);
            let (best_accuracy, phrases_completed) = match current {
                Some(c) => (
                    c.best_accuracy.max(run.accuracy),
                    c.phrases_completed.max(phrases),
                ),
                None => (run.accuracy, phrases),
            };
            self.activities.insert(
                activity_id,
                ActivityProgress {
                    completed: false,
                    started: true,
                    best_accuracy,
                    phrases_completed,
                },
            );
        }

        self.completed = self.activities.values().filter(|a| a.completed).count() as u32;
    }
}

/// Activity results of one mode, per difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeProgress {
    /// Easy activities.
    #[serde(default)]
    pub easy: LevelProgress,
    /// Medium activities.
    #[serde(default)]
    pub medium: LevelProgress,
    /// Advanced activities.
    #[serde(default)]
    pub advanced: LevelProgress,
}

impl ModeProgress {
    /// Progress at one difficulty.
    pub const fn level(&self, difficulty: Difficulty) -> &LevelProgress {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Advanced => &self.advanced,
        }
    }

    const fn level_mut(&mut self, difficulty: Difficulty) -> &mut LevelProgress {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Advanced => &mut self.advanced,
        }
    }
}

/// Cross-session progress of one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    /// XP earned over all sessions.
    pub total_xp: u32,
    /// Consecutive days played.
    pub current_streak: u32,
    /// Last day a session was played.
    pub last_played: Option<NaiveDate>,
    /// Day the daily challenge was last completed.
    pub daily_challenge_completed_on: Option<NaiveDate>,
    /// Activity results in phrase mode.
    #[serde(default)]
    pub phrases: ModeProgress,
    /// Activity results in dialogue mode.
    #[serde(default)]
    pub dialogues: ModeProgress,
}

impl PlayerProgress {
    /// Current level derived from the total XP.
    pub const fn level(&self) -> u32 {
        level_for_xp(self.total_xp)
    }

    /// Whether today's daily challenge is already done.
    pub fn daily_challenge_completed(&self, today: NaiveDate) -> bool {
        self.daily_challenge_completed_on == Some(today)
    }

    /// Apply the rules for loading progress on `today`.
    ///
    /// A streak survives only if the player last played today or yesterday.
    pub fn roll_over(mut self, today: NaiveDate) -> Self {
        if let Some(last) = self.last_played
            && last != today
            && Some(last) != yesterday(today)
        {
            self.current_streak = 0;
        }
        if self.daily_challenge_completed_on != Some(today) {
            self.daily_challenge_completed_on = None;
        }
        self
    }

    /// Record that the player played on `today`.
    ///
    /// Playing again on the same day changes nothing; playing the day after
    /// extends the streak; any longer gap restarts it at 1.
    pub fn record_play(mut self, today: NaiveDate) -> Self {
        match self.last_played {
            Some(last) if last == today => return self,
            Some(last) if Some(last) == yesterday(today) => {
                self.current_streak = self.current_streak.saturating_add(1);
            }
            _ => self.current_streak = 1,
        }
        self.last_played = Some(today);
        self
    }

    /// Add earned XP.
    pub fn add_xp(mut self, xp: u32) -> Self {
        self.total_xp = self.total_xp.saturating_add(xp);
        self
    }

    /// Mark the daily challenge as done on `today`.
    pub fn complete_daily_challenge(mut self, today: NaiveDate) -> Self {
        self.daily_challenge_completed_on = Some(today);
        self
    }

    /// Activity results for a mode and difficulty.
    pub const fn level_progress(&self, mode: Mode, difficulty: Difficulty) -> &LevelProgress {
        match mode {
            Mode::Phrases => self.phrases.level(difficulty),
            Mode::Dialogues => self.dialogues.level(difficulty),
        }
    }

    /// Fold a run of an activity into its record; see [`LevelProgress::record`].
    pub fn record_activity(
        mut self,
        mode: Mode,
        difficulty: Difficulty,
        activity_id: u32,
        run: ActivityRun,
    ) -> Self {
        let modes = match mode {
            Mode::Phrases => &mut self.phrases,
            Mode::Dialogues => &mut self.dialogues,
        };
        modes.level_mut(difficulty).record(activity_id, run);
        self
    }
}

fn yesterday(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_passing() {
        assert!(is_passing(75, ACCURACY_THRESHOLD));
        assert!(is_passing(100, ACCURACY_THRESHOLD));
        assert!(!is_passing(74, ACCURACY_THRESHOLD));
    }

    #[test]
    fn test_next_consecutive() {
        assert_eq!(next_consecutive(0, true), 1);
        assert_eq!(next_consecutive(4, true), 5);
        assert_eq!(next_consecutive(9, false), 0);
        assert_eq!(next_consecutive(u32::MAX, true), u32::MAX);
    }

    #[test]
    fn test_feedback() {
        assert_eq!(Feedback::for_accuracy(100), Feedback::Excellent);
        assert_eq!(Feedback::for_accuracy(91), Feedback::Excellent);
        assert_eq!(Feedback::for_accuracy(90), Feedback::Correct);
        assert_eq!(Feedback::for_accuracy(75), Feedback::Correct);
        assert_eq!(Feedback::for_accuracy(74), Feedback::AlmostThere);
        assert_eq!(Feedback::for_accuracy(0), Feedback::AlmostThere);

        assert_eq!(Feedback::with_threshold(80, 85), Feedback::AlmostThere);
        assert_eq!(Feedback::with_threshold(92, 95), Feedback::AlmostThere);
        assert_eq!(Feedback::with_threshold(60, 50), Feedback::Correct);
    }

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(499), 1);
        assert_eq!(level_for_xp(500), 2);
        assert_eq!(level_for_xp(1250), 3);
    }

    #[test]
    fn test_xp_level() {
        let level = xp_level(750);
        assert_eq!(level.level, 2);
        assert_eq!(level.progress, 50.0);
        assert_eq!(level.next_level_xp, 1000);

        let start = xp_level(0);
        assert_eq!(start.level, 1);
        assert_eq!(start.progress, 0.0);
        assert_eq!(start.next_level_xp, 500);
    }

    #[test]
    fn test_record_play_streak() {
        let today = date(2026, 3, 10);

        let fresh = PlayerProgress::default().record_play(today);
        assert_eq!(fresh.current_streak, 1);
        assert_eq!(fresh.last_played, Some(today));

        let same_day = fresh.clone().record_play(today);
        assert_eq!(same_day, fresh);

        let next_day = fresh.record_play(date(2026, 3, 11));
        assert_eq!(next_day.current_streak, 2);

        let after_gap = next_day.record_play(date(2026, 3, 14));
        assert_eq!(after_gap.current_streak, 1);
    }

    #[test]
    fn test_record_play_across_month_boundary() {
        let progress = PlayerProgress {
            current_streak: 3,
            last_played: Some(date(2026, 2, 28)),
            ..Default::default()
        };
        assert_eq!(progress.record_play(date(2026, 3, 1)).current_streak, 4);
    }

    #[test]
    fn test_roll_over() {
        let today = date(2026, 3, 10);
        let progress = PlayerProgress {
            total_xp: 900,
            current_streak: 6,
            last_played: Some(date(2026, 3, 9)),
            daily_challenge_completed_on: Some(date(2026, 3, 9)),
            ..Default::default()
        };

        let rolled = progress.clone().roll_over(today);
        assert_eq!(rolled.current_streak, 6);
        assert!(!rolled.daily_challenge_completed(today));
        assert_eq!(rolled.daily_challenge_completed_on, None);

        let stale = PlayerProgress {
            last_played: Some(date(2026, 3, 7)),
            ..progress
        }
        .roll_over(today);
        assert_eq!(stale.current_streak, 0);
        assert_eq!(stale.total_xp, 900);
    }

    #[test]
    fn test_daily_challenge_and_xp() {
        let today = date(2026, 3, 10);
        let progress = PlayerProgress::default()
            .add_xp(480)
            .add_xp(30)
            .complete_daily_challenge(today);

        assert_eq!(progress.total_xp, 510);
        assert_eq!(progress.level(), 2);
        assert!(progress.daily_challenge_completed(today));
        assert!(progress.clone().roll_over(today).daily_challenge_completed(today));
    }

    fn full_run(accuracy: u8) -> ActivityRun {
        ActivityRun {
            accuracy,
            phrases_completed: PHRASES_PER_ACTIVITY,
            fully_completed: true,
        }
    }

    fn partial_run(accuracy: u8, phrases_completed: u8) -> ActivityRun {
        ActivityRun {
            accuracy,
            phrases_completed,
            fully_completed: false,
        }
    }

    #[test]
    fn test_level_progress_default() {
        let level = LevelProgress::default();
        assert_eq!(level.total, ACTIVITIES_PER_LEVEL);
        assert_eq!(level.completed, 0);
        assert!(level.activity(1).is_none());
    }

    #[test]
    fn test_full_completion() {
        let mut level = LevelProgress::default();
        level.record(3, full_run(88));

        let activity = level.activity(3).unwrap();
        assert!(activity.completed);
        assert!(activity.started);
        assert_eq!(activity.best_accuracy, 88);
        assert_eq!(activity.phrases_completed, 10);
        assert_eq!(level.completed, 1);
    }

    #[test]
    fn test_lower_accuracy_keeps_completion() {
        let mut level = LevelProgress::default();
        level.record(1, full_run(92));
        level.record(1, full_run(80));
        assert_eq!(level.activity(1).unwrap().best_accuracy, 92);

        level.record(1, full_run(97));
        assert_eq!(level.activity(1).unwrap().best_accuracy, 97);
        assert_eq!(level.completed, 1);
    }

    #[test]
    fn test_partial_run_keeps_max() {
        let mut level = LevelProgress::default();
        level.record(2, partial_run(70, 6));
        level.record(2, partial_run(82, 4));

        let activity = level.activity(2).unwrap();
        assert!(!activity.completed);
        assert!(activity.started);
        assert_eq!(activity.best_accuracy, 82);
        assert_eq!(activity.phrases_completed, 6);
        assert_eq!(level.completed, 0);
    }

    #[test]
    fn test_partial_run_reopens_completed_activity() {
        let mut level = LevelProgress::default();
        level.record(5, full_run(90));
        level.record(5, partial_run(60, 3));

        let activity = level.activity(5).unwrap();
        assert!(!activity.completed);
        assert_eq!(activity.best_accuracy, 90);
        assert_eq!(activity.phrases_completed, 10);
        assert_eq!(level.completed, 0);
    }

    #[test]
    fn test_record_activity_targets_one_level() {
        let progress = PlayerProgress::default()
            .record_activity(Mode::Dialogues, Difficulty::Medium, 7, full_run(85));

        assert_eq!(
            progress
                .level_progress(Mode::Dialogues, Difficulty::Medium)
                .completed,
            1
        );
        assert_eq!(
            progress
                .level_progress(Mode::Phrases, Difficulty::Medium)
                .completed,
            0
        );
        assert!(
            progress
                .level_progress(Mode::Dialogues, Difficulty::Easy)
                .activity(7)
                .is_none()
        );
    }
}
