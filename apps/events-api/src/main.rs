use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::{AppState, Store};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    let dotenv = core_config::load_dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    dotenv.log();

    let store = match &config.mongodb {
        Some(mongo_config) => {
            info!("Connecting to MongoDB at {}", mongo_config.redacted_url());

            let client =
                database::mongodb::connect_from_config_with_retry(mongo_config, None).await?;
            let db = client.database(mongo_config.database());

            info!("Connected to MongoDB database: {}", mongo_config.database());
            Store::Mongo { client, db }
        }
        None => {
            info!("Using in-memory event store; data is lost on exit");
            Store::Memory
        }
    };

    let state = AppState { config, store };

    api::events::init_collection(&state).await?;

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} ({}s shutdown timeout)",
        state.config.app.name,
        state.config.app.version,
        SHUTDOWN_TIMEOUT.as_secs()
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, SHUTDOWN_TIMEOUT, async move {
        if let Store::Mongo { client, .. } = state.store {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connections closed");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Event service shutdown complete");
    Ok(())
}
