//! Prometheus metrics for request traffic and scoring outcomes.

use std::{sync::LazyLock, time::Instant};

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;
use solo_score::ScoringRule;

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("numeric segment pattern is valid"));

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
        )?
        .set_buckets_for_metric(
            Matcher::Full("attempt_accuracy".to_string()),
            &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 75.0, 90.0, 100.0],
        )?;

    let handle = builder.install_recorder()?;

    Ok(handle)
}

/// Router serving `/metrics` from the given handle
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(handle)
}

/// Middleware to record HTTP request metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Replace numeric path segments with `:id` to keep label cardinality low
fn normalize_path(path: &str) -> String {
    NUMERIC_SEGMENT.replace_all(path, "/:id").into_owned()
}

async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record the outcome of one scored attempt
pub fn record_attempt(accuracy: u8, passed: bool, rule: ScoringRule) {
    let outcome = if passed { "pass" } else { "fail" };
    let rule = match rule {
        ScoringRule::ExactMatch => "exact_match",
        ScoringRule::Truncated => "truncated",
        ScoringRule::Blended => "blended",
    };

    counter!("attempts_total", "outcome" => outcome, "rule" => rule).increment(1);
    histogram!("attempt_accuracy").record(f64::from(accuracy));
}

/// Record a best-match lookup
pub fn record_match_lookup(found: bool) {
    let status = if found { "found" } else { "none" };

    counter!("match_lookups_total", "status" => status).increment(1);
}
