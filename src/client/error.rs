/**
 * Client Error Types
 *
 * Errors surfaced by the session client. Nothing is retried; each error
 * reaches the caller as-is.
 */

use thiserror::Error;

use crate::shared::config::ConfigError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, reset, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("Request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, or the raw body
        message: String,
    },

    /// Token persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The operation needs a session token and there is none
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A response or event body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Whether the server rejected the credentials or the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
