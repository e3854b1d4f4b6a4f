//! Authentication Module
//!
//! This module handles user registration, login, session tokens and the
//! user records behind them.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations
//! - **`sessions`** - Session token issuing and verification
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email + password → user created → token returned
//! 2. **Login**: email + password → credentials verified → token returned
//! 3. **Check**: token → verified by the auth gate → user returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless; there is no server-side logout or revocation
//! - Invalid credentials return 401 (no information leakage)

/// User model and database operations
pub mod users;

/// Session token management
pub mod sessions;

/// HTTP handlers
pub mod handlers;

pub use handlers::{check_auth, list_users, login, signup, update_profile};
pub use sessions::{Claims, TokenError, TokenIssuer};
pub use users::User;
