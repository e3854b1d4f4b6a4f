/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container, holding:
 * - Server configuration
 * - The session token issuer/verifier
 * - The SQLite connection pool
 * - The handle to the presence task
 *
 * Every field is cheap to clone. Presence is not shared mutable state: the
 * handle only sends commands to the task that owns the registry.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::realtime::presence::PresenceHandle;
use crate::backend::server::config::ServerConfig;

/// Shared state of the backend
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Session token issuer/verifier, keyed with `JWT_SECRET`
    pub tokens: Arc<TokenIssuer>,

    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Handle to the presence task
    pub presence: PresenceHandle,
}

impl AppState {
    /// Build the state and spawn the presence task
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: ServerConfig, db_pool: SqlitePool) -> Self {
        let tokens = TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl);

        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            db_pool,
            presence: PresenceHandle::spawn(),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for PresenceHandle {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}
