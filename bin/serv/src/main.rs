use std::net::SocketAddr;

use solo_api::{config::ApiConfig, metrics, router, state::ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    solo_api::tracing::init_tracing(&config.env);

    let metrics_handle = metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let state = ApiState::new(&config)?;

    let app = router::app(state, &config).merge(metrics::metrics_router(metrics_handle));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        environment = ?config.env,
        pass_threshold = config.pass_threshold,
        "Server listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
