use std::time::Duration;

use axum::Router;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Per-IP rate limiting for the scoring API
///
/// Scoring runs a quadratic edit distance per request, so clients are held to
/// `per_second` requests with bursts of `burst_size`. The client IP is taken
/// from forwarding headers first, then from the peer address.
pub fn apply_rate_limit<S>(router: Router<S>, per_second: u64, burst_size: u32) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // One request of the quota comes back every `period`
    let governor_conf = Duration::from_secs(1)
        .checked_div(u32::try_from(per_second).unwrap_or(u32::MAX))
        .and_then(|period| {
            GovernorConfigBuilder::default()
                .period(period)
                .burst_size(burst_size)
                .key_extractor(SmartIpKeyExtractor)
                .use_headers()
                .finish()
        });

    match governor_conf {
        Some(conf) => router.layer(GovernorLayer::new(conf)),
        None => {
            tracing::warn!(
                per_second,
                burst_size,
                "Invalid rate limit configuration, rate limiting disabled"
            );
            router
        }
    }
}
