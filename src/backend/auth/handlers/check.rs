/**
 * Check Auth Handler
 *
 * GET /api/auth/check. The auth gate has already verified the token and
 * loaded the user; this handler only echoes the user back.
 *
 * Because tokens are stateless, a token the client has "logged out" of keeps
 * passing this check until it expires.
 */

use axum::response::Json;

use crate::backend::middleware::AuthUser;
use crate::shared::CheckAuthResponse;

pub async fn check_auth(AuthUser(user): AuthUser) -> Json<CheckAuthResponse> {
    tracing::debug!("[Auth] Session check for: {}", user.id);
    Json(CheckAuthResponse {
        success: true,
        user_data: user,
    })
}
