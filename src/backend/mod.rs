//! Backend Module
//!
//! This module contains all server-side code for PulseChat: an Axum HTTP
//! server with token authentication, a presence registry and a realtime
//! event stream.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - Signup, login and the auth gate for protected routes
//! - Presence tracking and online-set broadcasting
//! - Direct messages with `seen` tracking
//! - Database persistence (SQLite)
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Users, session tokens and auth handlers
//! - **`middleware`** - The auth gate
//! - **`realtime`** - Presence registry, presence task and SSE stream
//! - **`messaging`** - Direct message storage and handlers
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Auth gate
//! ├── realtime/       - Presence and event streaming
//! ├── messaging/      - Direct messages
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the token issuer, the database pool
//! and a handle to the presence task. The presence registry itself is owned
//! by that task and is never shared; handlers reach it through commands.
//!
//! # Error Handling
//!
//! Handlers return `BackendError`, which converts into a
//! `{"success": false, "message": ...}` response with the matching status.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Real-time presence and events
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Direct messages
pub mod messaging;

/// Re-export commonly used types
pub use error::BackendError;
pub use realtime::{handle_realtime_subscription, PresenceHandle};
pub use server::{build_app, create_app, AppState, ServerConfig};
