/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Issue a session token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown email and wrong password return the same 401 (no user enumeration)
 * - Every login issues a fresh token; earlier tokens stay valid until expiry
 * - User passwords are never returned in responses
 */
use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::{AuthResponse, LoginRequest};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - missing/invalid email or password, or a body that is
///   not a JSON object of the right shape
/// * `401 Unauthorized` - user not found or password incorrect
/// * `500 Internal Server Error` - database, hashing or signing failure
pub async fn login(
    State(state): State<AppState>,
    ApiJson(mut request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    request.normalize()?;
    tracing::info!("[Auth] Login request for: {}", request.email);

    let user = get_user_by_email(&state.db_pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] User not found: {}", request.email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("[Auth] Invalid password for user: {}", request.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("[Auth] Failed to create token: {:?}", e);
        BackendError::internal("Failed to create token")
    })?;

    tracing::info!("[Auth] User logged in successfully: {} ({})", user.email, user.id);

    Ok(Json(AuthResponse {
        success: true,
        token,
        user_data: user.into(),
        message: "Login successful".to_string(),
    }))
}
