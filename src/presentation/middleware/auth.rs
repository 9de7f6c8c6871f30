//! Authentication Middleware
//!
//! Bearer token validation for protected routes. The token must verify and
//! its subject must still exist in storage.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::application::services::{AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::SqliteUserRepository;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively and must be followed by exactly
/// one token.
fn bearer_token(header: &str) -> Result<&str, AppError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AppError::Unauthorized(
            "Invalid Authorization format. Use: Bearer <token>".into(),
        )),
    }
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

    let token = bearer_token(auth_header)?;

    let auth_service = AuthServiceImpl::new(
        Arc::new(SqliteUserRepository::new(state.db.clone())),
        state.ids.clone(),
        state.settings.jwt.clone(),
    );

    let user_id = auth_service.verify_token(token).await.map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}
