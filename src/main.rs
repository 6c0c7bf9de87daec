//! # Assetdesk API Main Entry Point
//!
//! This is the main entry point for the Assetdesk API service.

use assetdesk::{
    config::ConfigLoader, db::init_pool, seeds::seed_reference_data, server::run_server,
    telemetry::init_tracing,
};
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!("Configuration: {}", redacted_json);
    }

    let db = init_pool(&config).await?;
    Migrator::up(&db, None).await?;

    // Teams and asset types are read-only reference sets; make sure they exist.
    seed_reference_data(&db).await?;

    run_server(config, db).await
}
