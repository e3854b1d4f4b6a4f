/**
 * Realtime Stream Consumer
 *
 * Opens `GET /realtime?userId=...` and reads the Server-Sent Events stream
 * in a background task:
 *
 * - `getOnlineUsers` replaces the local online set (`watch` channel)
 * - `newMessage` is forwarded to message subscribers (`broadcast` channel)
 *
 * Closing (or dropping) the connection aborts the task, which drops the
 * HTTP response; the server sees the stream go away and removes the
 * presence entry.
 */

use futures_util::StreamExt;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::client::api::{check_status, ApiClient};
use crate::client::error::ClientError;
use crate::shared::{ChatMessage, EventType};

/// One decoded SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// `event:` field, `message` when absent
    pub event: String,
    /// `data:` lines joined with `\n`
    pub data: String,
}

/// Incremental Server-Sent Events decoder
///
/// Accepts arbitrary byte chunks; a line split across chunks is held until
/// its newline arrives. Comment lines (keep-alives) are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every event it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(frame) = self.dispatch() {
                    frames.push(frame);
                }
                continue;
            }
            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };
            match field {
                "event" => self.event = Some(value.to_string()),
                "data" => self.data.push(value.to_string()),
                _ => {}
            }
        }

        frames
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseFrame {
            event: event.unwrap_or_else(|| "message".to_string()),
            data,
        })
    }
}

/// Apply one frame to the local session state
pub fn apply_frame(
    frame: &SseFrame,
    online: &watch::Sender<Vec<String>>,
    messages: &broadcast::Sender<ChatMessage>,
) -> Result<(), ClientError> {
    match EventType::from_name(&frame.event) {
        Some(EventType::OnlineUsers) => {
            let users: Vec<String> = serde_json::from_str(&frame.data)?;
            tracing::debug!("[Realtime] Online users: {}", users.len());
            online.send_replace(users);
        }
        Some(EventType::NewMessage) => {
            let message: ChatMessage = serde_json::from_str(&frame.data)?;
            // No subscribers is fine
            let _ = messages.send(message);
        }
        None => tracing::debug!("[Realtime] Ignoring event: {}", frame.event),
    }
    Ok(())
}

/// An open realtime connection
#[derive(Debug)]
pub struct RealtimeConnection {
    user_id: String,
    task: JoinHandle<()>,
}

impl RealtimeConnection {
    /// Open the stream for `user_id` and start consuming it
    ///
    /// # Errors
    ///
    /// `ClientError::Network` or `ClientError::Rejected` if the stream could
    /// not be opened.
    pub async fn connect(
        api: &ApiClient,
        user_id: &str,
        online: watch::Sender<Vec<String>>,
        messages: broadcast::Sender<ChatMessage>,
    ) -> Result<Self, ClientError> {
        let response = api
            .http()
            .get(api.config().realtime_url())
            .query(&[("userId", user_id)])
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        let response = check_status(response).await?;

        tracing::info!("[Realtime] Connected as {}", user_id);

        let owner = user_id.to_string();
        let task = tokio::spawn(async move {
            let mut decoder = SseDecoder::new();
            let mut body = response.bytes_stream();

            while let Some(chunk) = body.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        tracing::warn!("[Realtime] Stream error: {}", e);
                        break;
                    }
                };
                for frame in decoder.push(&chunk) {
                    if let Err(e) = apply_frame(&frame, &online, &messages) {
                        tracing::warn!("[Realtime] Bad {} event: {}", frame.event, e);
                    }
                }
            }

            tracing::info!("[Realtime] Stream closed for {}", owner);
        });

        Ok(Self {
            user_id: user_id.to_string(),
            task,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Whether the stream is still being read
    pub fn is_open(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop reading and drop the HTTP stream
    pub fn close(&self) {
        self.task.abort();
    }
}

impl Drop for RealtimeConnection {
    fn drop(&mut self) {
        self.task.abort();
    }
}
