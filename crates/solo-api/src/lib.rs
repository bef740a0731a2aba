pub mod config;
pub mod content;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod practice;
pub mod progression;
pub mod router;
pub mod state;
pub mod tracing;
pub mod v1;
pub mod validation;

pub use config::ApiConfig;
pub use state::ApiState;
