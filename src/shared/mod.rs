//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the backend and the client library. These types describe the JSON bodies
//! of the HTTP API and the events pushed over the realtime stream.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All wire names are camelCase so the
//! browser client and the Rust client read the same payloads.

/// User profile and authentication payloads
pub mod user;

/// Direct message payloads
pub mod message;

/// Realtime event system
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use user::{
    AuthResponse, CheckAuthResponse, LoginRequest, SignupRequest, UpdateProfileRequest,
    UpdateProfileResponse, UserData, UsersResponse,
};
pub use message::{
    ChatMessage, MarkSeenResponse, MessagesResponse, SendMessageRequest, SendMessageResponse,
    SidebarResponse,
};
pub use event::{EventType, RealtimeEvent};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
