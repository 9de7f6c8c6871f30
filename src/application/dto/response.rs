//! Response DTOs
//!
//! Data structures for API response bodies. Snowflake ids are rendered as
//! strings so JavaScript clients keep full precision.

use serde::Serialize;

use crate::application::services::{AccessToken, MessagePage};
use crate::domain::{Message, User};

/// Public projection of a user; never carries the password hash
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub phone: String,
    pub email: Option<String>,
    pub profile_pic: Option<String>,
    pub about: Option<String>,
    pub is_online: bool,
    pub last_seen: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            phone: user.phone,
            email: user.email,
            profile_pic: user.profile_pic,
            about: user.about,
            is_online: user.is_online,
            last_seen: user.last_seen.to_rfc3339(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Message response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            chat_id: message.chat_id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.content,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

/// `GET /api/msgs`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePageResponse {
    pub messages: Vec<MessageResponse>,
    pub next_cursor: Option<String>,
}

impl From<MessagePage> for MessagePageResponse {
    fn from(page: MessagePage) -> Self {
        Self {
            messages: page.messages.into_iter().map(MessageResponse::from).collect(),
            next_cursor: page.next_cursor.map(|id| id.to_string()),
        }
    }
}

/// `POST /api/msgs`
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub msg: MessageResponse,
}

/// `POST /register`
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
}

/// `POST /login`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(user: User, token: AccessToken) -> Self {
        Self {
            token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user: user.into(),
        }
    }
}

/// `PUT /api/profile`
#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

impl ProfileUpdatedResponse {
    pub fn new(user: User) -> Self {
        Self {
            message: "Profile updated successfully",
            user: user.into(),
        }
    }
}
