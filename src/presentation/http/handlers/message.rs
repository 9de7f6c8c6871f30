//! Message Handlers
//!
//! The chat is named by the `id` header and the acting user by `userId`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::application::dto::request::{MessageQueryParams, SendMessageRequest};
use crate::application::dto::response::{MessagePageResponse, SendMessageResponse};
use crate::application::services::{MessageService, MessageServiceImpl};
use crate::infrastructure::metrics;
use crate::infrastructure::repositories::{SqliteChatRepository, SqliteMessageRepository};
use crate::presentation::http::extractors::{id_header, LenientJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

const CHAT_ID_HEADER: &str = "id";
const USER_ID_HEADER: &str = "userid";

type SqliteMessageService = MessageServiceImpl<SqliteMessageRepository, SqliteChatRepository>;

fn message_service(state: &AppState) -> SqliteMessageService {
    MessageServiceImpl::new(
        Arc::new(SqliteMessageRepository::new(state.db.clone())),
        Arc::new(SqliteChatRepository::new(state.db.clone())),
        state.relay.clone(),
        state.ids.clone(),
        state.settings.messages.clone(),
    )
}

fn missing_data() -> AppError {
    AppError::Validation("Missing data".into())
}

/// Get a page of a chat's messages, newest first
pub async fn get_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MessageQueryParams>,
) -> Result<Json<MessagePageResponse>, AppError> {
    let chat_id = id_header(&headers, CHAT_ID_HEADER, "chat id")?.ok_or_else(missing_data)?;
    let viewer_id = id_header(&headers, USER_ID_HEADER, "user id")?;

    let cursor = match query.cursor.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| AppError::BadRequest("Invalid cursor".into()))?,
        ),
    };

    let page = message_service(&state)
        .list_messages(chat_id, viewer_id, query.limit(), cursor)
        .await?;

    Ok(Json(MessagePageResponse::from(page)))
}

/// Send a message to a chat
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    LenientJson(body): LenientJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    let chat_id = id_header(&headers, CHAT_ID_HEADER, "chat id")?.ok_or_else(missing_data)?;
    let sender_id = id_header(&headers, USER_ID_HEADER, "user id")?.ok_or_else(missing_data)?;

    let message = message_service(&state)
        .send_message(chat_id, sender_id, &body.text)
        .await?;

    metrics::record_message_sent();

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            msg: message.into(),
        }),
    ))
}
