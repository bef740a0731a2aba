use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use serde::{Deserialize, Serialize};
use solo_score::{
    AccuracyBreakdown, Feedback, compute_xp, evaluate, find_best_match,
    progression::{is_passing, next_consecutive},
};
use validator::Validate;

use crate::{
    ApiState,
    content::{Difficulty, GameContent, Mode},
    error::ApiError,
    metrics,
};

/// Create the practice routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/practice/score", post(score))
        .route("/practice/xp", post(xp))
        .route("/practice/attempt", post(attempt))
        .route("/practice/match", post(best_match))
}

#[derive(Deserialize, Validate)]
struct ScoreRequest {
    #[validate(length(max = 500))]
    spoken: String,
    #[validate(length(max = 500))]
    expected: String,
}

#[derive(Serialize)]
struct ScoreResponse {
    #[serde(flatten)]
    breakdown: AccuracyBreakdown,
    passed: bool,
    feedback: Feedback,
}

async fn score(
    State(state): State<ApiState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    payload.validate()?;

    let breakdown = evaluate(&payload.spoken, &payload.expected);
    let passed = is_passing(breakdown.accuracy, state.pass_threshold);
    metrics::record_attempt(breakdown.accuracy, passed, breakdown.rule);

    Ok(Json(ScoreResponse {
        feedback: Feedback::with_threshold(breakdown.accuracy, state.pass_threshold),
        passed,
        breakdown,
    }))
}

#[derive(Deserialize, Validate)]
struct XpRequest {
    #[validate(range(max = 100))]
    accuracy: u8,
    response_time_ms: u64,
    #[serde(default)]
    consecutive_correct: u32,
    #[serde(default)]
    is_daily_challenge: bool,
}

#[derive(Debug, Serialize)]
struct XpResponse {
    xp: u32,
}

async fn xp(Json(payload): Json<XpRequest>) -> Result<Json<XpResponse>, ApiError> {
    payload.validate()?;

    let xp = compute_xp(
        payload.accuracy,
        Duration::from_millis(payload.response_time_ms),
        payload.consecutive_correct,
        payload.is_daily_challenge,
    );

    Ok(Json(XpResponse { xp }))
}

#[derive(Deserialize, Validate)]
struct AttemptRequest {
    mode: Mode,
    difficulty: Difficulty,
    content_id: u32,
    #[validate(length(max = 500))]
    spoken: String,
    response_time_ms: u64,
    /// Streak of passing answers before this attempt
    #[serde(default)]
    consecutive_correct: u32,
    #[serde(default)]
    is_daily_challenge: bool,
}

#[derive(Serialize)]
struct AttemptResponse {
    content_id: u32,
    expected: String,
    accuracy: u8,
    passed: bool,
    feedback: Feedback,
    consecutive_correct: u32,
    xp: u32,
}

/// Score one answer to a catalog item and award XP
///
/// XP is awarded for failed attempts too; the streak counter passed to the XP
/// policy already includes this attempt.
async fn attempt(
    State(state): State<ApiState>,
    Json(payload): Json<AttemptRequest>,
) -> Result<Json<AttemptResponse>, ApiError> {
    payload.validate()?;

    let content = state
        .catalog
        .get(payload.mode, payload.difficulty, payload.content_id)
        .ok_or_else(|| {
            ApiError::NotFound(format!("Content {} not found", payload.content_id))
        })?;

    let breakdown = evaluate(&payload.spoken, content.expected_transcript());
    let passed = is_passing(breakdown.accuracy, state.pass_threshold);
    let consecutive_correct = next_consecutive(payload.consecutive_correct, passed);
    let xp = compute_xp(
        breakdown.accuracy,
        Duration::from_millis(payload.response_time_ms),
        consecutive_correct,
        payload.is_daily_challenge,
    );

    metrics::record_attempt(breakdown.accuracy, passed, breakdown.rule);
    tracing::debug!(
        content_id = payload.content_id,
        accuracy = breakdown.accuracy,
        passed,
        xp,
        "Attempt scored"
    );

    Ok(Json(AttemptResponse {
        content_id: content.id(),
        expected: content.expected_transcript().to_string(),
        accuracy: breakdown.accuracy,
        passed,
        feedback: Feedback::with_threshold(breakdown.accuracy, state.pass_threshold),
        consecutive_correct,
        xp,
    }))
}

#[derive(Deserialize, Validate)]
struct MatchRequest {
    #[validate(length(min = 1, max = 500))]
    spoken: String,
    #[validate(range(max = 100))]
    threshold: Option<u8>,
    /// Restrict the search to one difficulty; all content otherwise
    difficulty: Option<Difficulty>,
}

#[derive(Serialize)]
struct MatchResponse {
    accuracy: u8,
    difficulty: Difficulty,
    content: GameContent,
}

const ALL_DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Advanced];

/// Find the catalog entry closest to a free-form transcript
async fn best_match(
    State(state): State<ApiState>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    payload.validate()?;

    let threshold = payload.threshold.unwrap_or(state.match_threshold);
    let difficulties = match payload.difficulty {
        Some(difficulty) => vec![difficulty],
        None => ALL_DIFFICULTIES.to_vec(),
    };

    let candidates: Vec<(Difficulty, &GameContent)> = difficulties
        .into_iter()
        .flat_map(|d| state.catalog.by_difficulty(d).iter().map(move |c| (d, c)))
        .collect();

    let found = find_best_match(
        &payload.spoken,
        candidates.iter().map(|(_, c)| c.expected_transcript()),
        threshold,
    );
    metrics::record_match_lookup(found.is_some());

    let best = found.ok_or_else(|| {
        ApiError::NotFound(format!("No content matches above {threshold}%"))
    })?;
    let (difficulty, content) = candidates[best.index];

    Ok(Json(MatchResponse {
        accuracy: best.accuracy,
        difficulty,
        content: content.clone(),
    }))
}
