//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::application::services::{LoginIdentifier, ProfileError, ProfileUpdate};
use crate::shared::validation::not_blank;

/// Registration request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(custom(function = "not_blank"))]
    pub username: String,

    #[validate(custom(function = "not_blank"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Missing data"))]
    pub password: String,
}

/// Login request; exactly one of `username` or `phone` names the account
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,

    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Missing data"))]
    pub password: String,
}

impl LoginRequest {
    /// Username wins when both are supplied.
    pub fn identifier(&self) -> Option<LoginIdentifier> {
        let present = |v: &Option<String>| v.as_ref().filter(|s| !s.trim().is_empty()).cloned();
        present(&self.username)
            .map(LoginIdentifier::Username)
            .or_else(|| present(&self.phone).map(LoginIdentifier::Phone))
    }
}

/// Send message request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Message history query parameters
///
/// Kept as raw strings so a garbage `limit` falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQueryParams {
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

impl MessageQueryParams {
    pub fn limit(&self) -> Option<i64> {
        self.limit.as_deref().and_then(|l| l.trim().parse().ok())
    }
}

/// Sparse profile update.
///
/// Every field distinguishes absent (`None`) from explicit `null`
/// (`Some(None)`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub username: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub profile_pic: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub about: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub is_online: Option<Option<bool>>,

    #[serde(default, deserialize_with = "double_option")]
    pub last_seen: Option<Option<DateTime<Utc>>>,
}

impl UpdateProfileRequest {
    pub fn into_update(self) -> Result<ProfileUpdate, ProfileError> {
        Ok(ProfileUpdate {
            username: required("username", self.username)?,
            phone: required("phone", self.phone)?,
            email: self.email,
            profile_pic: self.profile_pic,
            about: self.about,
            is_online: required("isOnline", self.is_online)?,
            last_seen: required("lastSeen", self.last_seen)?,
        })
    }
}

/// Non-nullable field: `null` is rejected, absence is fine.
fn required<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, ProfileError> {
    match value {
        Some(None) => Err(ProfileError::Invalid(format!("{} cannot be null", field))),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
