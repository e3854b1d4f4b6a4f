/**
 * Direct Message Payloads
 *
 * This module defines the message structure exchanged between two users,
 * plus the request and response bodies of the `/api/messages` endpoints.
 */
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::user::UserData;

/// A persisted direct message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/messages/send/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SendMessageRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    /// A message needs text or an image; blank text counts as absent.
    pub fn validate(&mut self) -> Result<(), SharedError> {
        self.text = self.text.take().filter(|t| !t.trim().is_empty());
        self.image = self.image.take().filter(|i| !i.trim().is_empty());
        if self.text.is_none() && self.image.is_none() {
            return Err(SharedError::validation("text", "Message must have text or an image"));
        }
        Ok(())
    }
}

/// Response of `POST /api/messages/send/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub new_message: ChatMessage,
}

/// Response of `GET /api/messages/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub success: bool,
    pub messages: Vec<ChatMessage>,
}

/// Response of `PUT /api/messages/mark/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkSeenResponse {
    pub success: bool,
    pub message: String,
}

/// Response of `GET /api/messages/users`
///
/// `unseen_messages` maps a sender id to the number of messages from that
/// sender the caller has not seen yet. Senders with nothing unseen are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarResponse {
    pub success: bool,
    pub users: Vec<UserData>,
    pub unseen_messages: HashMap<String, i64>,
}
