/**
 * Presence Registry
 *
 * Authoritative in-memory record of which users hold an open realtime
 * connection: one entry per user, mapping the user id to the id of that
 * user's most recent connection.
 *
 * The registry is a plain data structure with no locking. It is owned by
 * the presence task (see `presence.rs`), which applies connect/disconnect
 * commands one at a time.
 */

use std::collections::HashMap;

use uuid::Uuid;

/// Identifier of one realtime connection
pub type ConnectionId = Uuid;

#[derive(Debug, Default, Clone)]
pub struct PresenceRegistry {
    entries: HashMap<String, ConnectionId>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the entry for `user_id`; the last connection wins
    ///
    /// Returns the connection the user previously had, if any.
    pub fn add(&mut self, user_id: impl Into<String>, conn_id: ConnectionId) -> Option<ConnectionId> {
        self.entries.insert(user_id.into(), conn_id)
    }

    /// Remove the entry for `user_id` if it still points at `conn_id`
    ///
    /// A connection that was superseded by a newer one for the same user
    /// does not evict the newer entry when it closes.
    pub fn remove(&mut self, user_id: &str, conn_id: ConnectionId) -> bool {
        match self.entries.get(user_id) {
            Some(current) if *current == conn_id => {
                self.entries.remove(user_id);
                true
            }
            _ => false,
        }
    }

    /// Current connection for a user
    pub fn connection_of(&self, user_id: &str) -> Option<ConnectionId> {
        self.entries.get(user_id).copied()
    }

    pub fn is_online(&self, user_id: &str) -> bool {
        self.entries.contains_key(user_id)
    }

    /// The online set, sorted
    pub fn snapshot(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
