use axum::{
    Router, http::StatusCode, middleware, response::IntoResponse, routing::get,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    ApiConfig,
    middleware::{cors, rate_limit, request_id, security_headers},
    state::ApiState,
    v1,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .nest("/v1", v1::routes())
        .fallback(handler_404)
}

/// The full application with its middleware stack
///
/// The `/metrics` endpoint is served separately so it stays outside the rate
/// limiter; merge [`crate::metrics::metrics_router`] into the result.
pub fn app(state: ApiState, config: &ApiConfig) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let app = rate_limit::apply_rate_limit(
        router(),
        config.rate_limit_per_second,
        config.rate_limit_burst,
    )
    .with_state(state)
    .layer(cors::create_cors_layer(&config.allowed_origins))
    .layer(trace_layer)
    .layer(middleware::from_fn(crate::metrics::track_metrics))
    .layer(middleware::from_fn(request_id::request_id_middleware));

    security_headers::apply_security_headers(app, config.env)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
