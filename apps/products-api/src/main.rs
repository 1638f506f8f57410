//! Products API - REST server

use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

/// Product routes under `/api`, the OpenAPI document and the health probes.
fn build_app(config: &Config) -> eyre::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(api::routes(), &config.server)?;
    Ok(router.merge(health_router(config.app)))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let app = build_app(&config)?;

    info!(
        "Starting {} v{} ({:?}) on {}",
        config.app.name,
        config.app.version,
        config.environment,
        config.server.address()
    );

    create_production_app(app, &config.server, async {
        info!("Shutting down: dropping in-memory product store");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
