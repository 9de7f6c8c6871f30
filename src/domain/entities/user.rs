//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: INTEGER PRIMARY KEY (Snowflake ID)
/// - username: TEXT NOT NULL UNIQUE
/// - phone: TEXT NOT NULL UNIQUE
/// - password_hash: TEXT NOT NULL
/// - email: TEXT NULL UNIQUE
/// - profile_pic: TEXT NULL
/// - about: TEXT NULL
/// - is_online: INTEGER NOT NULL DEFAULT 0
/// - last_seen: INTEGER NOT NULL (Unix ms)
/// - created_at: INTEGER NOT NULL (Unix ms)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    pub username: String,

    pub phone: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub email: Option<String>,

    /// URL to the user's avatar image
    pub profile_pic: Option<String>,

    /// Free-form bio text
    pub about: Option<String>,

    pub is_online: bool,

    pub last_seen: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly registered, offline user.
    pub fn new(id: i64, username: String, phone: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            phone,
            password_hash,
            email: None,
            profile_pic: None,
            about: None,
            is_online: false,
            last_seen: now,
            created_at: now,
        }
    }
}

/// Sparse profile change.
///
/// Outer `None` leaves a column untouched. For nullable columns the inner
/// `None` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub phone: Option<String>,
    pub email: Option<Option<String>>,
    pub profile_pic: Option<Option<String>>,
    pub about: Option<Option<String>>,
    pub is_online: Option<bool>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.profile_pic.is_none()
            && self.about.is_none()
            && self.is_online.is_none()
            && self.last_seen.is_none()
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// Uniqueness violations surface as `AppError::Conflict(field)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Find a user by phone number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError>;

    /// Check whether a user id still exists.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Create a new user in the database.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Write only the columns present in `update` and return the stored user.
    ///
    /// Fails with `AppError::NotFound` when no user has this id.
    async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<User, AppError>;

    /// Delete a user by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
