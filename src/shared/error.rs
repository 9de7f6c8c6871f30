//! Application Error Types
//!
//! Centralized error handling with Axum integration. Every service error
//! converts into [`AppError`] here, so handlers only use `?`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::services::{AuthError, MessageError, ProfileError};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness violation; carries the offending field name.
    #[error("Duplicate field value: {0}")]
    Conflict(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut errors = None;
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, 10003, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, 10004, msg.clone()),
            AppError::Conflict(field) => {
                errors = Some(vec![FieldError {
                    field: field.clone(),
                    message: "already in use".into(),
                }]);
                (StatusCode::BAD_REQUEST, 10005, "Duplicate field value".into())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, 10007, msg.clone()),
            AppError::NotImplemented(what) => (
                StatusCode::NOT_IMPLEMENTED,
                10008,
                format!("{} is not implemented", what),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<MessageError> for AppError {
    fn from(e: MessageError) -> Self {
        match e {
            MessageError::MissingData => AppError::Validation("Missing data".into()),
            MessageError::ChatNotFound => AppError::NotFound("Chat not found".into()),
            MessageError::NotParticipant => AppError::Forbidden("Not part of this chat".into()),
            MessageError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingData => AppError::Validation("Missing data".into()),
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials".into())
            }
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::InvalidToken => AppError::Unauthorized("Invalid or expired token".into()),
            AuthError::UserNotFound => AppError::Unauthorized("User not found".into()),
            AuthError::Duplicate(field) => AppError::Conflict(field),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::NoData => AppError::Validation("No data provided for update".into()),
            ProfileError::Invalid(msg) => AppError::Validation(msg),
            ProfileError::Duplicate(field) => AppError::Conflict(field),
            ProfileError::UserNotFound => AppError::Unauthorized("User not found".into()),
            ProfileError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
