/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate and normalize the payload (email lowercased, name defaulted)
 * 2. Reject an email that is already registered
 * 3. Hash the password with bcrypt
 * 4. Create the user
 * 5. Issue a session token and return it with the public user data
 */

use axum::{extract::State, response::Json};
use bcrypt::hash;

use crate::backend::auth::users::{create_user, get_user_by_email, is_unique_violation, NewUser};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::{AuthResponse, SignupRequest};

/// Signup handler
///
/// # Errors
///
/// * `400 Bad Request` - missing/invalid email or password, or a body that is
///   not a JSON object of the right shape
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - hashing, database or signing failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {"fullName": "Ada", "email": "a@x.com", "password": "pw", "bio": "hi"}
/// ```
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(mut request): ApiJson<SignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    request.normalize()?;
    tracing::info!("[Auth] Signup request for: {}", request.email);

    if get_user_by_email(&state.db_pool, &request.email).await?.is_some() {
        tracing::warn!("[Auth] Email already registered: {}", request.email);
        return Err(BackendError::conflict("Account already exists"));
    }

    let password_hash = hash(&request.password, state.config.bcrypt_cost)?;

    let user = create_user(
        &state.db_pool,
        NewUser {
            email: request.email,
            full_name: request.full_name,
            password_hash,
            bio: request.bio,
        },
    )
    .await
    .map_err(|e| {
        // Lost a race with a concurrent signup for the same email
        if is_unique_violation(&e) {
            BackendError::conflict("Account already exists")
        } else {
            BackendError::from(e)
        }
    })?;

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("[Auth] Failed to create token: {:?}", e);
        BackendError::internal("Failed to create token")
    })?;

    tracing::info!("[Auth] User created: {} ({})", user.email, user.id);

    Ok(Json(AuthResponse {
        success: true,
        token,
        user_data: user.into(),
        message: "Account created successfully".to_string(),
    }))
}
