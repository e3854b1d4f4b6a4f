//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! └── router.rs       - Router creation, auth gate wiring and layers
//! ```
//!
//! # Route Types
//!
//! ## Public
//!
//! - `GET /api/status` - Liveness text
//! - `POST /api/auth/signup` - User registration
//! - `POST /api/auth/login` - User login
//! - `GET /realtime` - Presence and message stream
//!
//! ## Protected
//!
//! Everything else under `/api` passes the auth gate first; see
//! `backend::middleware::auth`.
//!
//! # Example
//!
//! ```rust,ignore
//! use pulsechat::backend::routes::create_router;
//! use pulsechat::backend::server::state::AppState;
//!
//! let app_state = AppState::new(config, pool);
//! let router = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

pub use router::{cors_layer, create_router};
