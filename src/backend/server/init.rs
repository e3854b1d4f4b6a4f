/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to the database and run migrations
 * 2. Create `AppState` (spawns the presence task)
 * 3. Create and configure the router
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, ServerConfig, StartupError};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// `StartupError` if the database cannot be opened or migrated.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing PulseChat backend server");

    let db_pool = connect_database(&config.database_url).await?;

    Ok(build_app(config, db_pool))
}

/// Build the router around an existing pool
///
/// Must be called from within a tokio runtime.
pub fn build_app(config: ServerConfig, db_pool: SqlitePool) -> Router<()> {
    let app_state = AppState::new(config, db_pool);
    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}
