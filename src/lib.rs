//! PulseChat - Main Library
//!
//! PulseChat is a realtime chat backend with stateless token authentication,
//! live presence and direct messages, plus the Rust client that keeps a
//! local session in sync with it.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and backend
//!   - User, auth and message payloads (camelCase JSON)
//!   - Realtime event types
//!   - Error and client configuration types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, auth gate, presence task
//!   - SQLite persistence through sqlx
//!
//! - **`client`** - Session client
//!   - Token persistence and local expiry check
//!   - HTTP API client and realtime stream consumer
//!   - `AuthContext`, the session state holder
//!
//! # Feature Flags
//!
//! - **`ssr`** - enables the backend modules and the server binary
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use pulsechat::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client
//!
//! ```rust,no_run
//! use pulsechat::client::{AuthContext, FileTokenStore};
//! use pulsechat::shared::LoginRequest;
//!
//! # async fn example() -> Result<(), pulsechat::client::ClientError> {
//! let mut ctx = AuthContext::new("http://localhost:5000", FileTokenStore::default_location()?)?;
//! ctx.load().await.ok();
//! if ctx.user().is_none() {
//!     ctx.login(LoginRequest::new("a@x.com", "pw")).await?;
//! }
//! println!("online: {:?}", ctx.online_users());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for payload validation
//! - `backend::BackendError` for HTTP handlers
//! - `client::ClientError` for the client library

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Session client
pub mod client;
