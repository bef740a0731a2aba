use axum::Router;

use crate::{content, practice, progression, state::ApiState};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .merge(practice::routes())
        .merge(content::routes())
        .merge(progression::routes())
}
