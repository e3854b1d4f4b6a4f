//! Database operations for messaging
//!
//! This module contains database operations for direct messages and their
//! `seen` flags.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::ChatMessage;

const MESSAGE_COLUMNS: &str = "id, sender_id, receiver_id, text, image, seen, created_at";

/// Row of the `messages` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub text: Option<String>,
    pub image: Option<String>,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        ChatMessage {
            id: row.id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            text: row.text,
            image: row.image,
            seen: row.seen,
            created_at: row.created_at,
        }
    }
}

/// Store a new unseen message
pub async fn create_message(
    pool: &SqlitePool,
    sender_id: Uuid,
    receiver_id: Uuid,
    text: Option<&str>,
    image: Option<&str>,
) -> Result<ChatMessage, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO messages (id, sender_id, receiver_id, text, image, seen, created_at)
        VALUES (?, ?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(id)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(text)
    .bind(image)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ChatMessage {
        id,
        sender_id,
        receiver_id,
        text: text.map(str::to_string),
        image: image.map(str::to_string),
        seen: false,
        created_at: now,
    })
}

/// All messages exchanged between two users, oldest first
pub async fn get_conversation(
    pool: &SqlitePool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {} FROM messages
        WHERE (sender_id = ? AND receiver_id = ?)
           OR (sender_id = ? AND receiver_id = ?)
        ORDER BY created_at ASC, rowid ASC
        "#,
        MESSAGE_COLUMNS
    );

    let rows = sqlx::query_as::<_, MessageRow>(&query)
        .bind(user_a)
        .bind(user_b)
        .bind(user_b)
        .bind(user_a)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Mark every message `sender_id` sent to `reader_id` as seen
///
/// # Returns
/// Number of messages that changed
pub async fn mark_conversation_seen(
    pool: &SqlitePool,
    reader_id: Uuid,
    sender_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE messages SET seen = 1 WHERE receiver_id = ? AND sender_id = ? AND seen = 0",
    )
    .bind(reader_id)
    .bind(sender_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Mark one message as seen, provided `reader_id` is its receiver
///
/// # Returns
/// `false` if no such message was addressed to `reader_id`
pub async fn mark_message_seen(
    pool: &SqlitePool,
    message_id: Uuid,
    reader_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE messages SET seen = 1 WHERE id = ? AND receiver_id = ?")
        .bind(message_id)
        .bind(reader_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Unseen message count per sender for one receiver
///
/// Senders with nothing unseen are absent from the map.
pub async fn unseen_counts(
    pool: &SqlitePool,
    receiver_id: Uuid,
) -> Result<HashMap<Uuid, i64>, sqlx::Error> {
    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT sender_id, COUNT(*) FROM messages
        WHERE receiver_id = ? AND seen = 0
        GROUP BY sender_id
        "#,
    )
    .bind(receiver_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}
