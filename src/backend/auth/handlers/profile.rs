/**
 * Profile Handlers
 *
 * - `PUT /api/auth/update-profile` - update the caller's name, bio or avatar
 * - `GET /api/user` - list every other user (contact sidebar)
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::shared::{UpdateProfileRequest, UpdateProfileResponse, UsersResponse};

/// Update the authenticated user's profile
///
/// # Errors
///
/// * `400 Bad Request` - no field given, or an empty full name
/// * `401 Unauthorized` - the user disappeared between the gate and the update
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, BackendError> {
    request.validate()?;

    let updated = users::update_profile(&pool, user.id, &request)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User not found"))?;

    tracing::info!("[Auth] Profile updated for: {}", updated.id);

    Ok(Json(UpdateProfileResponse {
        success: true,
        user: updated.into(),
        message: "Profile updated successfully".to_string(),
    }))
}

/// List all users except the caller
pub async fn list_users(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UsersResponse>, BackendError> {
    let users = users::list_users_except(&pool, user.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}
