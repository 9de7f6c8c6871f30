//! Chat entity and repository trait.
//!
//! Maps to the `chats` and `chat_participants` tables. Chats are created
//! outside the HTTP surface; the API only reads them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A conversation between a fixed set of participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,

    /// User ids allowed to read and send in this chat
    pub participant_ids: Vec<i64>,

    pub created_at: DateTime<Utc>,
}

impl Chat {
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.participant_ids.contains(&user_id)
    }
}

/// Repository trait for Chat data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Find a chat with its participant list.
    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError>;

    /// Create a chat together with its participant rows.
    async fn create(&self, chat: &Chat) -> Result<Chat, AppError>;
}
