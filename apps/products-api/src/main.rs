//! Products API - REST server for the product catalog

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageBackend};
use state::{AppState, Store};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let store = match config.storage {
        StorageBackend::MongoDb => {
            info!("Connecting to MongoDB at {}", config.mongodb.url());

            let client =
                database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
            let db = client.database(config.mongodb.database());

            info!(
                "Successfully connected to MongoDB database: {}",
                config.mongodb.database()
            );
            Store::MongoDb { client, db }
        }
        StorageBackend::Memory => {
            info!("Using in-memory product store");
            Store::Memory
        }
    };

    let state = AppState { config, store };
    let app = api::app(&state).await?;

    info!(
        "Starting Products API on port {} ({} storage)",
        state.config.server.port, state.config.storage
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        if let Store::MongoDb { client, .. } = state.store {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
