//! Shared Error Types
//!
//! This module defines error types that are shared between the client and backend.
//! These errors represent failures that can be detected before a request
//! ever reaches the database, so both sides report them the same way.
//!
//! # Usage
//!
//! ```rust
//! use pulsechat::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email address is required");
//! ```
use thiserror::Error;

/// Payload validation failure (missing fields, bad email, empty message)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message without the field prefix
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
        }
    }
}
