use axum_helpers::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to Postgres at {}", config.postgres.url());

    let db = database::postgres::connect_from_config(config.postgres.clone()).await?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "tasks-api").await?;

    let state = AppState { config, db };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let app = create_router::<openapi::ApiDoc>(api_routes);

    create_app(app, &state.config.server).await?;

    info!("Tasks API shutdown complete");
    Ok(())
}
