//! Message Repository Implementation
//!
//! SQLite implementation of message storage with keyset pagination over
//! `(created_at DESC, id DESC)`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::read_status_repository::upsert_read_status;
use crate::domain::{ChatReadStatus, Message, MessageRepository};
use crate::shared::error::AppError;
use crate::shared::time::{from_millis, to_millis};

/// SQLite message repository implementation.
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Creates a new SqliteMessageRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    chat_id: i64,
    sender_id: i64,
    content: String,
    created_at: i64,
}

impl MessageRow {
    /// Converts database row to domain Message entity.
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            chat_id: self.chat_id,
            sender_id: self.sender_id,
            content: self.content,
            created_at: from_millis(self.created_at),
        }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    /// Fetch up to `take` messages of a chat, newest first.
    ///
    /// The cursor row is joined by id and must belong to the same chat, so
    /// an unknown or foreign cursor produces an empty page.
    async fn find_page(
        &self,
        chat_id: i64,
        cursor: Option<i64>,
        take: i64,
    ) -> Result<Vec<Message>, AppError> {
        let rows = match cursor {
            Some(cursor_id) => {
                sqlx::query_as::<_, MessageRow>(
                    r#"
                    SELECT m.id, m.chat_id, m.sender_id, m.content, m.created_at
                    FROM messages m, messages c
                    WHERE c.id = ?2
                      AND c.chat_id = ?1
                      AND m.chat_id = ?1
                      AND (m.created_at < c.created_at
                           OR (m.created_at = c.created_at AND m.id < c.id))
                    ORDER BY m.created_at DESC, m.id DESC
                    LIMIT ?3
                    "#,
                )
                .bind(chat_id)
                .bind(cursor_id)
                .bind(take)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, MessageRow>(
                    r#"
                    SELECT id, chat_id, sender_id, content, created_at
                    FROM messages
                    WHERE chat_id = ?1
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?2
                    "#,
                )
                .bind(chat_id)
                .bind(take)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(|r| r.into_message()).collect())
    }

    async fn create_and_mark_read(
        &self,
        message: &Message,
    ) -> Result<(Message, ChatReadStatus), AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, chat_id, sender_id, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, chat_id, sender_id, content, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.chat_id)
        .bind(message.sender_id)
        .bind(&message.content)
        .bind(to_millis(message.created_at))
        .fetch_one(&mut *tx)
        .await?;

        let read_status =
            upsert_read_status(&mut *tx, row.chat_id, row.sender_id, row.id).await?;

        // Dropping the transaction on any error above rolls the insert back.
        tx.commit().await?;

        Ok((row.into_message(), read_status))
    }
}
