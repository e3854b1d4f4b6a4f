//! Messaging HTTP Handlers
//!
//! This module contains the HTTP handlers for direct messages. Every handler
//! sits behind the auth gate and reads the caller from `AuthUser`.

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::{get_user_by_id, list_users_except};
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::{
    MarkSeenResponse, MessagesResponse, RealtimeEvent, SendMessageRequest, SendMessageResponse,
    SidebarResponse,
};

fn parse_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::validation(format!("Invalid id: {}", raw)))
}

/// Sidebar data: every other user plus unseen counts per sender
pub async fn sidebar_users(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<SidebarResponse>, BackendError> {
    let users = list_users_except(&pool, user.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let unseen_messages = db::unseen_counts(&pool, user.id)
        .await?
        .into_iter()
        .map(|(sender, count)| (sender.to_string(), count))
        .collect();

    Ok(Json(SidebarResponse {
        success: true,
        users,
        unseen_messages,
    }))
}

/// Conversation with one user
///
/// Messages that user sent to the caller are marked seen.
pub async fn get_messages(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(other_id): Path<String>,
) -> Result<Json<MessagesResponse>, BackendError> {
    let other_id = parse_id(&other_id)?;

    let messages = db::get_conversation(&pool, user.id, other_id).await?;
    let marked = db::mark_conversation_seen(&pool, user.id, other_id).await?;
    if marked > 0 {
        tracing::debug!("Marked {} messages from {} as seen", marked, other_id);
    }

    Ok(Json(MessagesResponse {
        success: true,
        messages,
    }))
}

/// Mark one message addressed to the caller as seen
pub async fn mark_seen(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(message_id): Path<String>,
) -> Result<Json<MarkSeenResponse>, BackendError> {
    let message_id = parse_id(&message_id)?;

    if !db::mark_message_seen(&pool, message_id, user.id).await? {
        return Err(BackendError::not_found("Message not found"));
    }

    Ok(Json(MarkSeenResponse {
        success: true,
        message: "Message marked as seen".to_string(),
    }))
}

/// Send a message to another user
///
/// The stored message is pushed to the receiver as a `newMessage` event if
/// they are online. Delivery is best effort; the response does not depend
/// on it.
///
/// # Errors
///
/// * `400 Bad Request` - malformed id, or neither text nor image
/// * `404 Not Found` - receiver does not exist
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(receiver_id): Path<String>,
    ApiJson(mut request): ApiJson<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, BackendError> {
    let receiver_id = parse_id(&receiver_id)?;
    request.validate()?;

    if get_user_by_id(&state.db_pool, receiver_id).await?.is_none() {
        return Err(BackendError::not_found("Receiver not found"));
    }

    let message = db::create_message(
        &state.db_pool,
        user.id,
        receiver_id,
        request.text.as_deref(),
        request.image.as_deref(),
    )
    .await?;

    let event = RealtimeEvent::new_message(&message).map_err(|e| {
        tracing::error!("[Realtime] Failed to serialize message {}: {:?}", message.id, e);
        BackendError::internal("Failed to encode message")
    })?;
    match state
        .presence
        .send_to_user(receiver_id.to_string(), event)
        .await
    {
        Ok(true) => tracing::debug!("[Realtime] Delivered message {} to {}", message.id, receiver_id),
        Ok(false) => tracing::debug!("[Realtime] {} is offline, message {} stored only", receiver_id, message.id),
        Err(e) => tracing::warn!("[Realtime] Could not push message {}: {}", message.id, e),
    }

    Ok(Json(SendMessageResponse {
        success: true,
        new_message: message,
    }))
}
