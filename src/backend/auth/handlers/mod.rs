//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication and user endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── check.rs    - Session check handler
//! └── profile.rs  - Profile update and user listing
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`login`** - POST /api/auth/login
//! - **`check_auth`** - GET /api/auth/check (gated)
//! - **`update_profile`** - PUT /api/auth/update-profile (gated)
//! - **`list_users`** - GET /api/user (gated)
//!
//! Request and response bodies live in `crate::shared::user` so the client
//! library uses the same types.

pub mod signup;

pub mod login;

pub mod check;

pub mod profile;

pub use signup::signup;
pub use login::login;
pub use check::check_auth;
pub use profile::{list_users, update_profile};
