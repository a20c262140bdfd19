//! Catalog API - REST server for products, categories, variants and media

use axum_helpers::server::{close_postgres, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        database::common::Backoff::default(),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;
    }

    let state = AppState::new(config, db);

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.server,
        &state.config.environment,
    )?;

    // /health: liveness, /ready: database ping
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        "Starting catalog API"
    );

    create_production_app(app, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        close_postgres(state.db, "catalog").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
