//! Chat Repository Implementation
//!
//! Chats and their participant rows live in two tables; reads join them
//! back into a single `Chat`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{Chat, ChatRepository};
use crate::shared::error::AppError;
use crate::shared::time::{from_millis, to_millis};

#[derive(Debug, sqlx::FromRow)]
struct ChatRow {
    id: i64,
    created_at: i64,
}

/// SQLite chat repository implementation.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: SqlitePool,
}

impl SqliteChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError> {
        let row = sqlx::query_as::<_, ChatRow>("SELECT id, created_at FROM chats WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let participant_ids = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM chat_participants WHERE chat_id = ? ORDER BY user_id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Chat {
            id: row.id,
            participant_ids,
            created_at: from_millis(row.created_at),
        }))
    }

    async fn create(&self, chat: &Chat) -> Result<Chat, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO chats (id, created_at) VALUES (?, ?)")
            .bind(chat.id)
            .bind(to_millis(chat.created_at))
            .execute(&mut *tx)
            .await?;

        for user_id in &chat.participant_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO chat_participants (chat_id, user_id) VALUES (?, ?)",
            )
            .bind(chat.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(chat_id = chat.id, participants = chat.participant_ids.len(), "Chat created");

        Ok(chat.clone())
    }
}
