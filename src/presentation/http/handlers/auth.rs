//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{LoginResponse, RegisterResponse};
use crate::application::services::{AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::SqliteUserRepository;
use crate::presentation::http::extractors::LenientJson;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthServiceImpl<SqliteUserRepository> {
    AuthServiceImpl::new(
        Arc::new(SqliteUserRepository::new(state.db.clone())),
        state.ids.clone(),
        state.settings.jwt.clone(),
    )
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let user = auth_service(&state)
        .register(&body.username, &body.phone, &body.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user: user.into() }),
    ))
}

/// Login with username or phone plus password
pub async fn login(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let identifier = body
        .identifier()
        .ok_or_else(|| AppError::Validation("Missing data".into()))?;

    let (user, token) = auth_service(&state)
        .login(identifier, &body.password)
        .await?;

    Ok(Json(LoginResponse::new(user, token)))
}

/// Registration verification (OTP) - routed, not implemented
pub async fn verify_registration() -> AppError {
    AppError::NotImplemented("verifyReg")
}

pub async fn request_otp() -> AppError {
    AppError::NotImplemented("requestOtp")
}

pub async fn verify_otp() -> AppError {
    AppError::NotImplemented("verifyOtp")
}

pub async fn forgot_password() -> AppError {
    AppError::NotImplemented("forgotPassword")
}

pub async fn reset_password() -> AppError {
    AppError::NotImplemented("resetPassword")
}
