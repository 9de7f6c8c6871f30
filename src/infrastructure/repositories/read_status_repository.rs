//! Read Status Queries
//!
//! The read marker is only written inside the message insert transaction,
//! so these queries take a connection instead of owning a pool.

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::domain::ChatReadStatus;
use crate::shared::time::{from_millis, to_millis};

#[derive(Debug, sqlx::FromRow)]
struct ReadStatusRow {
    chat_id: i64,
    user_id: i64,
    last_seen_message_id: Option<i64>,
    updated_at: i64,
}

impl ReadStatusRow {
    fn into_read_status(self) -> ChatReadStatus {
        ChatReadStatus {
            chat_id: self.chat_id,
            user_id: self.user_id,
            last_seen_message_id: self.last_seen_message_id,
            updated_at: from_millis(self.updated_at),
        }
    }
}

/// Insert or move the marker for `(chat_id, user_id)`.
///
/// At most one row exists per pair; later calls overwrite it.
pub(crate) async fn upsert_read_status(
    conn: &mut SqliteConnection,
    chat_id: i64,
    user_id: i64,
    last_seen_message_id: i64,
) -> Result<ChatReadStatus, sqlx::Error> {
    let row = sqlx::query_as::<_, ReadStatusRow>(
        r#"
        INSERT INTO chat_read_status (chat_id, user_id, last_seen_message_id, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (chat_id, user_id) DO UPDATE
        SET last_seen_message_id = excluded.last_seen_message_id,
            updated_at = excluded.updated_at
        RETURNING chat_id, user_id, last_seen_message_id, updated_at
        "#,
    )
    .bind(chat_id)
    .bind(user_id)
    .bind(last_seen_message_id)
    .bind(to_millis(Utc::now()))
    .fetch_one(conn)
    .await?;

    Ok(row.into_read_status())
}
