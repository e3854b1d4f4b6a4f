/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) subscription handler
 * for the `/realtime` endpoint. Each request opens one presence connection;
 * the response stream owns the `PresenceSession`, so when the transport
 * drops the stream the connection is disconnected.
 *
 * # Server-Sent Events (SSE)
 *
 * SSE gives a one-way stream from server to client, which is all the
 * presence protocol needs. Keep-alive comments are the only liveness signal;
 * a write failure on a dead socket is what eventually drops the stream.
 */

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::realtime::presence::{PresenceHandle, PresenceSession};
use crate::backend::server::state::AppState;

/// Query parameters of `GET /realtime`
#[derive(Debug, Default, Deserialize)]
pub struct RealtimeQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Handle real-time subscription (GET /realtime)
///
/// # Query Parameters
///
/// - `userId` - identity of the connecting user (optional; anonymous
///   connections receive broadcasts but are not listed as online)
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: getOnlineUsers
/// data: ["0b5c...","9f1e..."]
///
/// event: newMessage
/// data: {"_id":"...","senderId":"...","text":"hi",...}
/// ```
pub async fn handle_realtime_subscription(
    State(state): State<AppState>,
    Query(query): Query<RealtimeQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, BackendError> {
    let user_id = query
        .user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    tracing::info!("[Realtime] Subscription request (user: {:?})", user_id);

    let session = open_session(&state.presence, user_id)?;
    let stream = session_stream(session);

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(state.config.keep_alive)))
}

fn open_session(
    presence: &PresenceHandle,
    user_id: Option<String>,
) -> Result<PresenceSession, BackendError> {
    presence
        .connect(user_id)
        .map_err(|e| BackendError::internal(e.to_string()))
}

/// Turn a presence session into an SSE event stream
///
/// The stream ends when the session's queue is closed; dropping the stream
/// drops the session.
pub fn session_stream(session: PresenceSession) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(session, |mut session| async move {
        loop {
            let event = session.recv().await?;

            let data = match serde_json::to_string(&event.payload) {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                    continue;
                }
            };

            tracing::debug!(
                "[Realtime] Sending {} to {}",
                event.name(),
                session.conn_id()
            );

            let sse_event = Event::default().event(event.name()).data(data);
            return Some((Ok(sse_event), session));
        }
    })
}
