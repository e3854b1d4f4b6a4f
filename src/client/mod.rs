//! Session Client
//!
//! Rust client for the PulseChat backend. It persists the session token,
//! re-authenticates on load and owns the realtime connection.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs       - Module exports and documentation
//! ├── config.rs    - Backend URL configuration
//! ├── error.rs     - ClientError
//! ├── session.rs   - Token stores and local expiry check
//! ├── api.rs       - Typed HTTP calls
//! ├── realtime.rs  - SSE decoding and the realtime connection
//! └── auth.rs      - AuthContext
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod realtime;
pub mod session;

pub use api::ApiClient;
pub use auth::AuthContext;
pub use config::ClientConfig;
pub use error::ClientError;
pub use realtime::{RealtimeConnection, SseDecoder, SseFrame};
pub use session::{is_expired, token_expiry, FileTokenStore, MemoryTokenStore, TokenStore};
