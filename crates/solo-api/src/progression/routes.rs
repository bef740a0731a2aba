use axum::{
    Json, Router,
    extract::Path,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use solo_score::{
    ActivityRun, Difficulty, LevelProgress, Mode, PlayerProgress, XpLevel,
    progression::{ACTIVITIES_PER_LEVEL, PHRASES_PER_ACTIVITY},
    xp_level,
};
use validator::Validate;

use crate::error::ApiError;

/// Create the progression routes
pub fn routes() -> Router<crate::ApiState> {
    Router::new()
        .route("/levels/{total_xp}", get(get_level))
        .route("/progress", post(update_progress))
}

async fn get_level(Path(total_xp): Path<u32>) -> Json<XpLevel> {
    Json(xp_level(total_xp))
}

/// A finished session reported by the client
#[derive(Deserialize, Validate)]
struct SessionReport {
    /// Progress as last stored by the client
    #[serde(default)]
    progress: PlayerProgress,
    #[serde(default)]
    earned_xp: u32,
    #[serde(default)]
    daily_challenge_completed: bool,
    /// Activity played during the session, if any
    #[validate(nested)]
    activity: Option<ActivityReport>,
    /// Day the session was played; the server's UTC date when omitted
    today: Option<NaiveDate>,
}

/// One run through a task
#[derive(Deserialize, Validate)]
struct ActivityReport {
    mode: Mode,
    difficulty: Difficulty,
    #[validate(range(min = 1, max = 50))]
    task_id: u32,
    /// Average accuracy over the phrases played
    #[validate(range(max = 100))]
    accuracy: u8,
    #[validate(range(max = 10))]
    #[serde(default = "default_phrases_completed")]
    phrases_completed: u8,
    #[serde(default = "default_fully_completed")]
    fully_completed: bool,
}

const fn default_phrases_completed() -> u8 {
    PHRASES_PER_ACTIVITY
}

const fn default_fully_completed() -> bool {
    true
}

#[derive(Serialize)]
struct ProgressResponse {
    progress: PlayerProgress,
    level: XpLevel,
    daily_challenge_completed: bool,
    /// Progress of the level the reported activity belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    activity_level: Option<LevelProgress>,
}

/// Fold a finished session into the player's progress
///
/// Stale streaks and daily challenges are rolled over first, then the play is
/// recorded, the earned XP added and the activity result stored. The server
/// keeps no state; the client stores the returned progress.
async fn update_progress(
    Json(report): Json<SessionReport>,
) -> Result<Json<ProgressResponse>, ApiError> {
    report.validate()?;

    let today = report.today.unwrap_or_else(|| Utc::now().date_naive());

    let mut progress = report
        .progress
        .roll_over(today)
        .record_play(today)
        .add_xp(report.earned_xp);

    let activity_level = match report.activity {
        Some(activity) => {
            progress = progress.record_activity(
                activity.mode,
                activity.difficulty,
                activity.task_id,
                ActivityRun {
                    accuracy: activity.accuracy,
                    phrases_completed: activity.phrases_completed,
                    fully_completed: activity.fully_completed,
                },
            );
            let level = progress.level_progress(activity.mode, activity.difficulty);
            tracing::debug!(
                task_id = activity.task_id,
                completed = level.completed,
                total = ACTIVITIES_PER_LEVEL,
                "Activity recorded"
            );
            Some(level.clone())
        }
        None => None,
    };

    if report.daily_challenge_completed {
        progress = progress.complete_daily_challenge(today);
    }

    tracing::debug!(
        total_xp = progress.total_xp,
        streak = progress.current_streak,
        "Progress updated"
    );

    Ok(Json(ProgressResponse {
        level: xp_level(progress.total_xp),
        daily_challenge_completed: progress.daily_challenge_completed(today),
        activity_level,
        progress,
    }))
}
