//! Profile Service
//!
//! Partial updates of the caller's own profile.

use std::sync::Arc;

use async_trait::async_trait;
use validator::{ValidateEmail, ValidateUrl};

pub use crate::domain::ProfileUpdate;
use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;

/// Profile service trait
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Apply the present fields of `update` to `user_id`'s profile.
    async fn update_profile(&self, user_id: i64, update: ProfileUpdate)
        -> Result<User, ProfileError>;
}

/// Reject present values that can never be stored.
fn validate(update: &ProfileUpdate) -> Result<(), ProfileError> {
    if matches!(&update.username, Some(u) if u.trim().is_empty()) {
        return Err(ProfileError::Invalid("username must not be blank".into()));
    }
    if matches!(&update.phone, Some(p) if p.trim().is_empty()) {
        return Err(ProfileError::Invalid("phone must not be blank".into()));
    }
    if let Some(Some(email)) = &update.email {
        if !email.validate_email() {
            return Err(ProfileError::Invalid("email: Invalid email format".into()));
        }
    }
    if let Some(Some(url)) = &update.profile_pic {
        if !url.validate_url() {
            return Err(ProfileError::Invalid("profilePic: Invalid URL".into()));
        }
    }
    Ok(())
}

/// Usernames and phone numbers are stored trimmed.
fn normalize(mut update: ProfileUpdate) -> ProfileUpdate {
    update.username = update.username.map(|u| u.trim().to_string());
    update.phone = update.phone.map(|p| p.trim().to_string());
    update
}

/// Profile service errors
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("No data provided for update")]
    NoData,

    #[error("{0}")]
    Invalid(String),

    #[error("Duplicate field value: {0}")]
    Duplicate(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for ProfileError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Conflict(field) => ProfileError::Duplicate(field),
            AppError::NotFound(_) => ProfileError::UserNotFound,
            e => ProfileError::Internal(e.to_string()),
        }
    }
}

/// ProfileService implementation
pub struct ProfileServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProfileServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> ProfileService for ProfileServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn update_profile(
        &self,
        user_id: i64,
        update: ProfileUpdate,
    ) -> Result<User, ProfileError> {
        if update.is_empty() {
            return Err(ProfileError::NoData);
        }
        validate(&update)?;

        let updated = self
            .user_repo
            .update_profile(user_id, &normalize(update))
            .await?;

        tracing::debug!(user_id, "Profile updated");

        Ok(updated)
    }
}
