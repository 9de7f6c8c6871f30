//! WebSocket Message Types
//!
//! Relay frames are JSON text of the form `{"event": <name>, "data": <any>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names understood by the relay
pub mod events {
    /// Rebroadcast to every connection, sender included
    pub const CHAT_MESSAGE: &str = "chat message";
    /// Subscribe to a chat's persisted messages
    pub const JOIN: &str = "join";
    /// Drop a chat subscription
    pub const LEAVE: &str = "leave";
    /// Server-sent: a message was persisted in a joined chat
    pub const MESSAGE_NEW: &str = "message:new";
}

/// A single relay frame, inbound or outbound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl RelayFrame {
    pub fn new(event: &str, data: Value) -> Self {
        Self {
            event: event.to_string(),
            data,
        }
    }

    /// `chatId` of a join/leave payload; accepts a string or a number.
    pub fn chat_id(&self) -> Option<i64> {
        match self.data.get("chatId")? {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }
}
