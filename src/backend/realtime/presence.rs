/**
 * Presence Task
 *
 * A single tokio task owns the `PresenceRegistry` and the outbound queue of
 * every realtime connection. Connection handlers talk to it through a
 * cloneable `PresenceHandle`, which sends commands over an mpsc channel, so
 * registry mutations are applied one at a time in arrival order.
 *
 * # Connection Lifecycle
 *
 * ```text
 * Connecting ──connect()──▶ Connected ──drop / close()──▶ Disconnected
 * ```
 *
 * - **Connect**: the connection's queue is registered; if it carries a user
 *   id the registry entry is upserted. The online set is then broadcast to
 *   every connection.
 * - **Disconnect**: the queue is dropped; the registry entry is removed if it
 *   still points at this connection. The online set is broadcast again.
 *
 * `PresenceSession` sends the disconnect command from its `Drop`, so a
 * realtime response stream being dropped by the transport is enough to
 * clean up presence.
 */

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::backend::realtime::broadcast::{broadcast_event, ConnectionReceiver, ConnectionSender};
use crate::backend::realtime::registry::{ConnectionId, PresenceRegistry};
use crate::shared::RealtimeEvent;

/// Command processed by the presence task
#[derive(Debug)]
pub enum PresenceCommand {
    Connect {
        conn_id: ConnectionId,
        user_id: Option<String>,
        sender: ConnectionSender,
    },
    Disconnect {
        conn_id: ConnectionId,
        user_id: Option<String>,
    },
    Snapshot {
        reply: oneshot::Sender<Vec<String>>,
    },
    SendTo {
        user_id: String,
        event: RealtimeEvent,
        reply: oneshot::Sender<bool>,
    },
}

/// The presence task has stopped and no longer accepts commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("presence task is not running")]
pub struct PresenceUnavailable;

/// State of one realtime connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

/// Cloneable handle to the presence task
#[derive(Clone, Debug)]
pub struct PresenceHandle {
    commands: mpsc::UnboundedSender<PresenceCommand>,
}

impl PresenceHandle {
    /// Spawn the presence task on the current runtime
    pub fn spawn() -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_presence(rx));
        Self { commands }
    }

    /// Register a new realtime connection
    ///
    /// `user_id` is the identity the connection announced, if any. Connections
    /// without one still receive broadcasts.
    ///
    /// # Errors
    ///
    /// `PresenceUnavailable` if the presence task has stopped.
    pub fn connect(&self, user_id: Option<String>) -> Result<PresenceSession, PresenceUnavailable> {
        let mut session = PresenceSession {
            conn_id: Uuid::new_v4(),
            user_id,
            state: ConnectionState::Connecting,
            events: None,
            presence: self.clone(),
        };

        let (sender, receiver) = mpsc::unbounded_channel();
        self.commands
            .send(PresenceCommand::Connect {
                conn_id: session.conn_id,
                user_id: session.user_id.clone(),
                sender,
            })
            .map_err(|_| {
                tracing::error!("[Presence] Presence task is gone, rejecting connection");
                PresenceUnavailable
            })?;

        session.events = Some(receiver);
        session.state = ConnectionState::Connected;
        Ok(session)
    }

    /// Current online set, sorted
    pub async fn online_users(&self) -> Result<Vec<String>, PresenceUnavailable> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(PresenceCommand::Snapshot { reply })
            .map_err(|_| PresenceUnavailable)?;
        rx.await.map_err(|_| PresenceUnavailable)
    }

    /// Deliver an event to the current connection of one user
    ///
    /// # Returns
    ///
    /// `true` if the user was online and the event was queued
    pub async fn send_to_user(
        &self,
        user_id: impl Into<String>,
        event: RealtimeEvent,
    ) -> Result<bool, PresenceUnavailable> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(PresenceCommand::SendTo {
                user_id: user_id.into(),
                event,
                reply,
            })
            .map_err(|_| PresenceUnavailable)?;
        rx.await.map_err(|_| PresenceUnavailable)
    }

    fn disconnect(&self, conn_id: ConnectionId, user_id: Option<String>) {
        // Fails only when the task is gone, and then there is nothing to clean up
        let _ = self
            .commands
            .send(PresenceCommand::Disconnect { conn_id, user_id });
    }
}

/// One open realtime connection
///
/// Receives the events queued for this connection. Dropping the session
/// disconnects it.
#[derive(Debug)]
pub struct PresenceSession {
    conn_id: ConnectionId,
    user_id: Option<String>,
    state: ConnectionState,
    events: Option<ConnectionReceiver>,
    presence: PresenceHandle,
}

impl PresenceSession {
    pub fn conn_id(&self) -> ConnectionId {
        self.conn_id
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Next event queued for this connection
    ///
    /// Returns `None` once the connection is closed.
    pub async fn recv(&mut self) -> Option<RealtimeEvent> {
        match self.events.as_mut() {
            Some(events) => events.recv().await,
            None => None,
        }
    }

    /// Close the connection explicitly
    pub fn close(&mut self) {
        if self.state == ConnectionState::Connected {
            self.presence.disconnect(self.conn_id, self.user_id.clone());
        }
        self.events = None;
        self.state = ConnectionState::Disconnected;
    }
}

impl Drop for PresenceSession {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_presence(mut commands: mpsc::UnboundedReceiver<PresenceCommand>) {
    let mut registry = PresenceRegistry::new();
    let mut connections: HashMap<ConnectionId, ConnectionSender> = HashMap::new();

    tracing::info!("[Presence] Presence task started");

    while let Some(command) = commands.recv().await {
        match command {
            PresenceCommand::Connect {
                conn_id,
                user_id,
                sender,
            } => {
                connections.insert(conn_id, sender);
                match user_id {
                    Some(user_id) => {
                        if let Some(previous) = registry.add(user_id.clone(), conn_id) {
                            tracing::debug!(
                                "[Presence] {} reconnected, superseding {}",
                                user_id,
                                previous
                            );
                        }
                        tracing::info!("[Presence] User connected: {} ({})", user_id, conn_id);
                    }
                    None => tracing::debug!("[Presence] Anonymous connection: {}", conn_id),
                }
                broadcast_online_users(&registry, &connections);
            }
            PresenceCommand::Disconnect { conn_id, user_id } => {
                connections.remove(&conn_id);
                if let Some(user_id) = user_id {
                    if registry.remove(&user_id, conn_id) {
                        tracing::info!("[Presence] User disconnected: {} ({})", user_id, conn_id);
                    } else {
                        tracing::debug!("[Presence] Stale connection closed for {}", user_id);
                    }
                }
                broadcast_online_users(&registry, &connections);
            }
            PresenceCommand::Snapshot { reply } => {
                let _ = reply.send(registry.snapshot());
            }
            PresenceCommand::SendTo {
                user_id,
                event,
                reply,
            } => {
                let delivered = registry
                    .connection_of(&user_id)
                    .and_then(|conn_id| connections.get(&conn_id))
                    .map(|sender| sender.send(event).is_ok())
                    .unwrap_or(false);
                let _ = reply.send(delivered);
            }
        }
    }

    tracing::info!("[Presence] All handles dropped, presence task stopping");
}

fn broadcast_online_users(
    registry: &PresenceRegistry,
    connections: &HashMap<ConnectionId, ConnectionSender>,
) {
    let event = RealtimeEvent::online_users(&registry.snapshot());
    broadcast_event(connections.values(), &event);
}
