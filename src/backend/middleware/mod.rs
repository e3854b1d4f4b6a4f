//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! - **`auth`** - the auth gate protecting every route that needs a user
//! - **`json`** - `ApiJson`, a JSON body extractor with structured rejections
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use pulsechat::backend::middleware::auth_gate;
//!
//! let protected = Router::new()
//!     .route("/api/auth/check", get(check_auth))
//!     .route_layer(from_fn_with_state(state.clone(), auth_gate));
//! ```

pub mod auth;
pub mod json;

pub use auth::{auth_gate, extract_token, AuthUser};
pub use json::ApiJson;
