//! Message Service
//!
//! Paginated chat history and message sending.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::config::MessageSettings;
use crate::domain::{Chat, ChatRepository, Message, MessageRepository};
use crate::shared::snowflake::SnowflakeGenerator;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Page through a chat's history, newest first.
    ///
    /// When `viewer_id` is given the viewer must be a participant.
    async fn list_messages(
        &self,
        chat_id: i64,
        viewer_id: Option<i64>,
        limit: Option<i64>,
        cursor: Option<i64>,
    ) -> Result<MessagePage, MessageError>;

    /// Persist a message from a participant and publish it.
    async fn send_message(
        &self,
        chat_id: i64,
        sender_id: i64,
        text: &str,
    ) -> Result<Message, MessageError>;
}

/// Receives every persisted message.
#[cfg_attr(test, mockall::automock)]
pub trait MessagePublisher: Send + Sync {
    fn publish_message(&self, message: &Message);
}

/// One page of history plus the cursor for the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    /// Id of the last message on this page when older messages remain
    pub next_cursor: Option<i64>,
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Missing data")]
    MissingData,

    #[error("Chat not found")]
    ChatNotFound,

    #[error("Not part of this chat")]
    NotParticipant,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// MessageService implementation
pub struct MessageServiceImpl<M, C>
where
    M: MessageRepository,
    C: ChatRepository,
{
    message_repo: Arc<M>,
    chat_repo: Arc<C>,
    publisher: Arc<dyn MessagePublisher>,
    id_generator: Arc<SnowflakeGenerator>,
    paging: MessageSettings,
}

impl<M, C> MessageServiceImpl<M, C>
where
    M: MessageRepository,
    C: ChatRepository,
{
    pub fn new(
        message_repo: Arc<M>,
        chat_repo: Arc<C>,
            publisher: Arc<dyn MessagePublisher>,
        id_generator: Arc<SnowflakeGenerator>,
        paging: MessageSettings,
    ) -> Self {
        Self {
            message_repo,
            chat_repo,
            publisher,
            id_generator,
            paging,
        }
    }

    /// Absent or non-positive limits fall back to the default page size.
    fn page_size(&self, limit: Option<i64>) -> i64 {
        match limit {
            Some(n) if n > 0 => n.min(self.paging.max_page_size),
            _ => self.paging.default_page_size,
        }
    }

    async fn participant_chat(&self, chat_id: i64, user_id: i64) -> Result<Chat, MessageError> {
        let chat = self
            .chat_repo
            .find_by_id(chat_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::ChatNotFound)?;

        if !chat.has_participant(user_id) {
            return Err(MessageError::NotParticipant);
        }

        Ok(chat)
    }
}

#[async_trait]
impl<M, C> MessageService for MessageServiceImpl<M, C>
where
    M: MessageRepository + 'static,
    C: ChatRepository + 'static,
{
    async fn list_messages(
        &self,
        chat_id: i64,
        viewer_id: Option<i64>,
        limit: Option<i64>,
        cursor: Option<i64>,
    ) -> Result<MessagePage, MessageError> {
        if let Some(viewer_id) = viewer_id {
            self.participant_chat(chat_id, viewer_id).await?;
        }

        let take = self.page_size(limit);

        // One extra row tells us whether another page exists.
        let mut messages = self
            .message_repo
            .find_page(chat_id, cursor, take + 1)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        let next_cursor = if messages.len() as i64 > take {
            messages.truncate(take as usize);
            messages.last().map(|m| m.id)
        } else {
            None
        };

        Ok(MessagePage {
            messages,
            next_cursor,
        })
    }

    async fn send_message(
        &self,
        chat_id: i64,
        sender_id: i64,
        text: &str,
    ) -> Result<Message, MessageError> {
        let content = text.trim_end();
        if content.trim_start().is_empty() {
            return Err(MessageError::MissingData);
        }

        self.participant_chat(chat_id, sender_id).await?;

        let message = Message {
            id: self.id_generator.generate(),
            chat_id,
            sender_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        let (created, read_status) = self
            .message_repo
            .create_and_mark_read(&message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        self.publisher.publish_message(&created);

        tracing::debug!(
            message_id = created.id,
            chat_id,
            sender_id,
            last_seen = ?read_status.last_seen_message_id,
            "Message sent"
        );

        Ok(created)
    }
}
