//! Logging for the scoring service
//!
//! Development logs are pretty-printed, production logs are JSON with the
//! request span attached. `RUST_LOG` replaces the default filter entirely.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default filter when `RUST_LOG` is unset
///
/// The service crates log one level more verbosely than their dependencies.
/// Production keeps per-request `tower_http` spans at info so every scored
/// attempt can be traced by its request ID.
pub const fn default_filter(env: Environment) -> &'static str {
    match env {
        Environment::Development => {
            "info,solo_api=debug,solo_score=debug,serv=debug,tower_http=debug"
        }
        Environment::Production => "warn,solo_api=info,serv=info,tower_http=info",
    }
}

fn env_filter(env: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(env)))
}

/// Install the global subscriber for `env`
pub fn init_tracing(env: &Environment) {
    let filter = env_filter(*env);

    if env.is_development() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_filter(filter),
            )
            .init();
    }

    tracing::info!(
        environment = ?env,
        filter = default_filter(*env),
        "Tracing initialized"
    );
}
