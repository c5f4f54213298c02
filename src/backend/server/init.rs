/**
 * Server Initialization
 *
 * Opens the database, builds the application state and assembles the
 * router.
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database cannot be opened or its schema cannot be created.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing EventBoard backend server");

    let pool = load_database(&config.database_url).await?;
    Ok(create_app_with_pool(pool, config))
}

/// Build the application around an already opened pool
pub fn create_app_with_pool(pool: SqlitePool, config: ServerConfig) -> Router<()> {
    let app_state = AppState::new(pool, config);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
