//! Chat read status entity.
//!
//! Maps to the `chat_read_status` table, keyed by `(chat_id, user_id)`.
//! The marker moves in the same transaction that stores a message, see
//! [`MessageRepository::create_and_mark_read`](super::MessageRepository::create_and_mark_read).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The last message a user is known to have seen in a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReadStatus {
    pub chat_id: i64,
    pub user_id: i64,
    pub last_seen_message_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}
