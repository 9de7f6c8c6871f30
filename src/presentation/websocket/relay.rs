//! WebSocket Relay
//!
//! Registry of open relay connections and the chats each one joined.

use std::collections::HashSet;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::{events, RelayFrame};
use crate::application::dto::response::MessageResponse;
use crate::application::services::MessagePublisher;
use crate::domain::Message;
use crate::infrastructure::metrics;

/// Outbound queue of a single connection
pub type FrameSender = mpsc::UnboundedSender<String>;

/// Relay managing all connections
#[derive(Default)]
pub struct Relay {
    /// Open connections by id
    connections: DashMap<Uuid, FrameSender>,
    /// Chat id to subscribed connection ids
    rooms: DashMap<i64, HashSet<Uuid>>,
    /// Connection id to joined chat ids, for cleanup on disconnect
    memberships: DashMap<Uuid, HashSet<i64>>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly opened connection
    pub fn register(&self, connection_id: Uuid, sender: FrameSender) {
        self.connections.insert(connection_id, sender);
        metrics::set_relay_connections(self.connections.len());

        tracing::debug!(%connection_id, "Relay connection registered");
    }

    /// Forget a connection and all of its chat subscriptions
    pub fn unregister(&self, connection_id: Uuid) {
        if self.connections.remove(&connection_id).is_none() {
            return;
        }

        if let Some((_, chats)) = self.memberships.remove(&connection_id) {
            for chat_id in chats {
                self.remove_from_room(chat_id, connection_id);
            }
        }

        metrics::set_relay_connections(self.connections.len());

        tracing::debug!(%connection_id, "Relay connection unregistered");
    }

    /// Subscribe a connection to a chat
    pub fn join(&self, connection_id: Uuid, chat_id: i64) {
        if !self.connections.contains_key(&connection_id) {
            return;
        }
        self.rooms.entry(chat_id).or_default().insert(connection_id);
        self.memberships
            .entry(connection_id)
            .or_default()
            .insert(chat_id);
    }

    /// Drop a connection's chat subscription
    pub fn leave(&self, connection_id: Uuid, chat_id: i64) {
        self.remove_from_room(chat_id, connection_id);
        if let Some(mut chats) = self.memberships.get_mut(&connection_id) {
            chats.remove(&chat_id);
        }
    }

    fn remove_from_room(&self, chat_id: i64, connection_id: Uuid) {
        if let Some(mut members) = self.rooms.get_mut(&chat_id) {
            members.remove(&connection_id);
        }
        self.rooms.remove_if(&chat_id, |_, members| members.is_empty());
    }

    /// Send `text` to every open connection. Returns the number reached.
    pub fn broadcast(&self, text: &str) -> usize {
        self.connections
            .iter()
            .filter(|entry| entry.value().send(text.to_string()).is_ok())
            .count()
    }

    /// Send `text` to connections that joined `chat_id`. Returns the number reached.
    pub fn send_to_chat(&self, chat_id: i64, text: &str) -> usize {
        let Some(members) = self.rooms.get(&chat_id).map(|m| m.value().clone()) else {
            return 0;
        };

        members
            .iter()
            .filter_map(|id| self.connections.get(id))
            .filter(|sender| sender.send(text.to_string()).is_ok())
            .count()
    }

    /// Get connection count
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Drop every sender so each connection's writer ends and closes its socket.
    pub fn shutdown(&self) {
        let open = self.connections.len();
        self.connections.clear();
        self.rooms.clear();
        self.memberships.clear();
        metrics::set_relay_connections(0);

        tracing::info!(connections = open, "Relay shut down");
    }
}

impl MessagePublisher for Relay {
    fn publish_message(&self, message: &Message) {
        let encoded = serde_json::to_value(MessageResponse::from(message.clone()))
            .and_then(|data| serde_json::to_string(&RelayFrame::new(events::MESSAGE_NEW, data)));

        match encoded {
            Ok(text) => {
                let reached = self.send_to_chat(message.chat_id, &text);
                tracing::debug!(chat_id = message.chat_id, reached, "Published message");
            }
            Err(e) => tracing::error!(error = %e, "Failed to encode relay frame"),
        }
    }
}
