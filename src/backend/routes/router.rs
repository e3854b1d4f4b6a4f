/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Groups
 *
 * 1. Public routes (status, signup, login, realtime stream)
 * 2. Protected routes, wrapped in the auth gate with `route_layer` so that
 *    only matched routes are gated and unknown paths still reach the
 *    fallback
 * 3. Fallback handler (JSON 404)
 *
 * # Layers
 *
 * - `DefaultBodyLimit` of 4 MB for JSON bodies
 * - `TraceLayer` for request spans
 * - `CorsLayer` allowing the origins in `ALLOWED_ORIGINS`, with credentials
 */

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::auth::{check_auth, list_users, login, signup, update_profile};
use crate::backend::error::BackendError;
use crate::backend::messaging::{get_messages, mark_seen, send_message, sidebar_users};
use crate::backend::middleware::{auth::TOKEN_HEADER, auth_gate};
use crate::backend::realtime::handle_realtime_subscription;
use crate::backend::server::state::AppState;

/// Maximum accepted request body
pub const BODY_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Public
///
/// - `GET /api/status` - Liveness text
/// - `POST /api/auth/signup` - User registration
/// - `POST /api/auth/login` - User login
/// - `GET /realtime?userId=` - Presence and message stream (SSE)
///
/// ## Protected (auth gate)
///
/// - `GET /api/auth/check` - Current user
/// - `PUT /api/auth/update-profile` - Update the current user's profile
/// - `GET /api/user` - All other users
/// - `GET /api/messages/users` - Sidebar users and unseen counts
/// - `GET /api/messages/{id}` - Conversation with a user
/// - `PUT /api/messages/mark/{id}` - Mark a message seen
/// - `POST /api/messages/send/{id}` - Send a message
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = Router::new()
        .route("/api/auth/check", get(check_auth))
        .route("/api/auth/update-profile", put(update_profile))
        .route("/api/user", get(list_users))
        .route("/api/messages/users", get(sidebar_users))
        .route("/api/messages/{id}", get(get_messages))
        .route("/api/messages/mark/{id}", put(mark_seen))
        .route("/api/messages/send/{id}", post(send_message))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_gate));

    let cors = cors_layer(&app_state.config.allowed_origins);

    Router::new()
        .route("/api/status", get(server_status))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/realtime", get(handle_realtime_subscription))
        .merge(protected)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Liveness check
async fn server_status() -> &'static str {
    "Server is live"
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route not found")
}

/// CORS policy for the configured origin list
///
/// Credentials are allowed, so methods and headers are listed explicitly.
/// Origins that are not valid header values are skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(TOKEN_HEADER),
        ])
        .allow_credentials(true)
}
