/**
 * Authentication Middleware
 *
 * This module provides the auth gate for routes that require an
 * authenticated user. It extracts the session token from the request
 * headers, verifies it, loads the user and attaches the public user data to
 * the request extensions.
 *
 * Every rejection is a structured `BackendError` response; the gate never
 * lets a fault propagate to a generic 500.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::UserData;

/// Raw token header, checked before `Authorization`
pub const TOKEN_HEADER: &str = "token";

/// Authenticated user attached by the gate
///
/// Also usable as an extractor in gated handlers.
#[derive(Clone, Debug)]
pub struct AuthUser(pub UserData);

/// Extract the session token from request headers
///
/// Accepted forms, in order:
/// - `token: <token>`
/// - `Authorization: Bearer <token>`
/// - `Authorization: <token>`
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers
        .get(TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if raw.is_some() {
        return raw;
    }

    let auth_header = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match auth_header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => auth_header,
    };

    // A bare scheme with nothing after it
    if token.is_empty() || token.eq_ignore_ascii_case("bearer") {
        None
    } else {
        Some(token)
    }
}

/// Auth gate middleware
///
/// 1. Extracts the token from `token` or `Authorization`
/// 2. Verifies it
/// 3. Loads the user it was issued for
/// 4. Attaches `AuthUser` (password hash stripped) to request extensions
///
/// Returns 401 for a missing, invalid or expired token and for a user that
/// no longer exists.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = extract_token(request.headers())
        .map(str::to_owned)
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing token on {}", request.uri().path());
            BackendError::unauthorized("No token provided")
        })?;

    let user_id = state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user = get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] Token for unknown user: {}", user_id);
            BackendError::unauthorized("User not found")
        })?;

    request.extensions_mut().insert(AuthUser(user.into()));

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            tracing::warn!("[Auth] AuthUser not found in request extensions");
            BackendError::unauthorized("Not authenticated")
        })
    }
}
