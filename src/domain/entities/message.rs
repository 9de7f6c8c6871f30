//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ChatReadStatus;
use crate::shared::error::AppError;

/// A text message sent in a chat.
///
/// Maps to the `messages` table:
/// - id: INTEGER PRIMARY KEY (Snowflake ID)
/// - chat_id: INTEGER NOT NULL REFERENCES chats(id)
/// - sender_id: INTEGER NOT NULL REFERENCES users(id)
/// - content: TEXT NOT NULL
/// - created_at: INTEGER NOT NULL (Unix ms)
///
/// Messages are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Owning chat
    pub chat_id: i64,

    /// Author user ID
    pub sender_id: i64,

    pub content: String,

    /// Timestamp when message was sent
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Keyset page of a chat's history, newest first.
    ///
    /// Ordering is `(created_at DESC, id DESC)`. With a cursor, only rows
    /// strictly after the cursor row in that order are returned; a cursor
    /// that is not a message of this chat yields no rows.
    async fn find_page(
        &self,
        chat_id: i64,
        cursor: Option<i64>,
        take: i64,
    ) -> Result<Vec<Message>, AppError>;

    /// Store a message and move its sender's read marker to it.
    ///
    /// Both writes commit together or not at all.
    async fn create_and_mark_read(
        &self,
        message: &Message,
    ) -> Result<(Message, ChatReadStatus), AppError>;
}
