use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    ApiState,
    content::{Difficulty, GameContent, Mode},
    error::ApiError,
    validation,
};

/// Create the content routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/content/{mode}/{difficulty}", get(list_content))
        .route("/content/{mode}/{difficulty}/{content_id}", get(get_content))
        .route(
            "/content/{mode}/{difficulty}/tasks/{task_id}",
            get(get_task),
        )
}

async fn list_content(
    State(state): State<ApiState>,
    Path((mode, difficulty)): Path<(Mode, Difficulty)>,
) -> Json<Vec<GameContent>> {
    Json(state.catalog.pool(mode, difficulty).to_vec())
}

async fn get_content(
    State(state): State<ApiState>,
    Path((mode, difficulty, content_id)): Path<(Mode, Difficulty, u32)>,
) -> Result<Json<GameContent>, ApiError> {
    state
        .catalog
        .get(mode, difficulty, content_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Content {content_id} not found")))
}

async fn get_task(
    State(state): State<ApiState>,
    Path((mode, difficulty, task_id)): Path<(Mode, Difficulty, u32)>,
) -> Result<Json<Vec<GameContent>>, ApiError> {
    validation::validate_task_id(task_id)?;

    let items = state
        .catalog
        .task(mode, difficulty, task_id)
        .ok_or_else(|| ApiError::Validation("Task numbers start at 1".to_string()))?;

    tracing::debug!(?mode, ?difficulty, task_id, "Serving task");

    Ok(Json(items.into_iter().cloned().collect()))
}
