//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and middleware and can be converted
//! to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `AuthenticationFailure` - missing/invalid/expired token, unknown user
//! - `ValidationFailure` - bad signup/login/profile/message payload
//! - `Conflict` - email already registered
//! - `NotFound` - target user or message missing
//! - `StorageError` / `HashError` / `Internal` - server-side failures
//!
//! Every variant becomes a `{"success": false, "message": ...}` body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
