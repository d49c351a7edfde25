use axum_helpers::create_production_app;
use catalog_api::{AppState, Config, api, build_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let state = AppState::new(config, mongo_client)?;
    info!(database = %state.config.mongodb.database(), "Connected to MongoDB");

    api::users::init_indexes(&state).await?;

    let app = build_app(&state)?;

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting with graceful shutdown ({}s timeout)",
        SHUTDOWN_TIMEOUT.as_secs()
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(app, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Closing MongoDB connections");
        mongo_client.shutdown().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutdown complete");
    Ok(())
}
