/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are returned from handlers and middleware and are always
 * converted into a structured JSON response, never an unhandled fault.
 *
 * # Error Categories
 *
 * ## Authentication Failures
 *
 * - Missing token, invalid or expired token
 * - Token for a user that no longer exists
 * - Wrong email/password pair
 *
 * ## Validation Failures
 *
 * - Missing or malformed signup/login/profile/message fields
 *
 * ## Storage Failures
 *
 * - Database errors and password hashing errors; details are logged
 *   but never sent to the client
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use pulsechat::backend::error::BackendError;
///
/// let err = BackendError::unauthorized("No token provided");
/// assert_eq!(err.status_code().as_u16(), 401);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing/invalid/expired token, unknown user, or bad credentials
    #[error("Authentication failed: {message}")]
    AuthenticationFailure {
        /// Human-readable error message
        message: String,
    },

    /// Bad request payload
    #[error("Validation failed: {message}")]
    ValidationFailure {
        /// Human-readable error message
        message: String,
    },

    /// Resource already exists (e.g. email already registered)
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Target user or message does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Validation error raised by the shared payload types
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error
    #[error("Storage error: {0}")]
    StorageError(#[from] sqlx::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    HashError(#[from] bcrypt::BcryptError),

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::AuthenticationFailure {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `AuthenticationFailure` - 401 Unauthorized
    /// - `ValidationFailure` / `SharedError` - 400 Bad Request
    /// - `Conflict` - 409 Conflict
    /// - `NotFound` - 404 Not Found
    /// - `StorageError` / `HashError` / `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthenticationFailure { .. } => StatusCode::UNAUTHORIZED,
            Self::ValidationFailure { .. } => StatusCode::BAD_REQUEST,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StorageError(_) | Self::HashError(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client
    ///
    /// Server-side failures collapse to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::AuthenticationFailure { message }
            | Self::ValidationFailure { message }
            | Self::Conflict { message }
            | Self::NotFound { message } => message.clone(),
            Self::SharedError(err) => err.message().to_string(),
            Self::StorageError(_) | Self::HashError(_) | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}
