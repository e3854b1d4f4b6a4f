//! Messaging Module
//!
//! This module handles direct messages between two users: storing them,
//! reading conversations, tracking the `seen` flag and pushing new messages
//! to an online receiver.

pub mod handlers;
pub mod db;

pub use handlers::*;
