//! Profile Handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::application::dto::request::UpdateProfileRequest;
use crate::application::dto::response::ProfileUpdatedResponse;
use crate::application::services::{ProfileService, ProfileServiceImpl};
use crate::infrastructure::repositories::SqliteUserRepository;
use crate::presentation::http::extractors::LenientJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Partially update the authenticated user's profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    LenientJson(body): LenientJson<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdatedResponse>, AppError> {
    let update = body.into_update()?;

    let profile_service =
        ProfileServiceImpl::new(Arc::new(SqliteUserRepository::new(state.db.clone())));

    let user = profile_service.update_profile(auth.user_id, update).await?;

    Ok(Json(ProfileUpdatedResponse::new(user)))
}
