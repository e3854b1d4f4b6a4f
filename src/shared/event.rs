/**
 * Realtime Event System
 *
 * This module defines the events pushed to clients over the realtime stream.
 * Each event carries a name (sent as the SSE `event:` field) and a JSON
 * payload (sent as the `data:` field).
 *
 * # Events
 *
 * - `getOnlineUsers` - array of user ids currently present
 * - `newMessage` - a direct message addressed to the receiving user
 */
use serde::{Deserialize, Serialize};

use crate::shared::message::ChatMessage;

/// Type of realtime event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// Online set changed
    #[serde(rename = "getOnlineUsers")]
    OnlineUsers,
    /// Direct message delivered to its receiver
    #[serde(rename = "newMessage")]
    NewMessage,
}

impl EventType {
    /// Event name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnlineUsers => "getOnlineUsers",
            Self::NewMessage => "newMessage",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "getOnlineUsers" => Some(Self::OnlineUsers),
            "newMessage" => Some(Self::NewMessage),
            _ => None,
        }
    }
}

/// Realtime event delivered to one or more connections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
}

impl RealtimeEvent {
    /// Create a new realtime event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Create an online-set event
    pub fn online_users(user_ids: &[String]) -> Self {
        Self::new(EventType::OnlineUsers, serde_json::json!(user_ids))
    }

    /// Create a new-message event
    pub fn new_message(message: &ChatMessage) -> Result<Self, serde_json::Error> {
        Ok(Self::new(EventType::NewMessage, serde_json::to_value(message)?))
    }

    /// Event name on the wire
    pub fn name(&self) -> &'static str {
        self.event_type.as_str()
    }
}
