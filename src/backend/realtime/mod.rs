//! Real-time Presence Module
//!
//! This module tracks which users hold an open realtime connection and pushes
//! events to those connections: the online set after every presence change,
//! and direct messages to their receiver.
//!
//! # Architecture
//!
//! - **`registry`** - user id → connection id map (the online set)
//! - **`presence`** - the presence task owning the registry, its handle and
//!   per-connection sessions
//! - **`broadcast`** - per-connection queue types and fan-out
//! - **`subscription`** - Server-Sent Events handler for `GET /realtime`
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── registry.rs     - Presence registry
//! ├── presence.rs     - Presence task and sessions
//! ├── broadcast.rs    - Event fan-out
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! # Events
//!
//! - `getOnlineUsers` - sorted array of online user ids
//! - `newMessage` - a message addressed to the connected user
//!
//! # Example
//!
//! ```rust,ignore
//! use pulsechat::backend::realtime::PresenceHandle;
//!
//! let presence = PresenceHandle::spawn();
//! let mut session = presence.connect(Some(user_id))?;
//! while let Some(event) = session.recv().await {
//!     // forward to the client
//! }
//! ```

/// Presence registry
pub mod registry;

/// Presence task and connection sessions
pub mod presence;

/// Event fan-out
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

pub use broadcast::{broadcast_event, ConnectionReceiver, ConnectionSender};
pub use presence::{ConnectionState, PresenceHandle, PresenceSession, PresenceUnavailable};
pub use registry::{ConnectionId, PresenceRegistry};
pub use subscription::handle_realtime_subscription;
