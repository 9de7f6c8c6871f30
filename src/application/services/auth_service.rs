//! Authentication Service
//!
//! Handles registration, password verification, and JWT bearer tokens.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, username: &str, phone: &str, password: &str)
        -> Result<User, AuthError>;

    /// Authenticate with username or phone and issue an access token
    async fn login(
        &self,
        identifier: LoginIdentifier,
        password: &str,
    ) -> Result<(User, AccessToken), AuthError>;

    /// Validate an access token and confirm its user still exists
    async fn verify_token(&self, access_token: &str) -> Result<i64, AuthError>;
}

/// How a user names themselves at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Username(String),
    Phone(String),
}

/// Issued bearer token
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing data")]
    MissingData,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Duplicate field value: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for AuthError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Conflict(field) => AuthError::Duplicate(field),
            e => AuthError::Internal(e.to_string()),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    id_generator: Arc<SnowflakeGenerator>,
    jwt_settings: JwtSettings,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(
        user_repo: Arc<U>,
        id_generator: Arc<SnowflakeGenerator>,
        jwt_settings: JwtSettings,
    ) -> Self {
        Self {
            user_repo,
            id_generator,
            jwt_settings,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Sign an HS256 access token for `user_id`
    fn issue_token(&self, user_id: i64) -> Result<AccessToken, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.jwt_settings.access_token_expiry_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AccessToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_settings.access_token_expiry_minutes * 60,
        })
    }

    /// Decode and validate access token
    fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn register(
        &self,
        username: &str,
        phone: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let username = username.trim();
        let phone = phone.trim();
        if username.is_empty() || phone.is_empty() || password.is_empty() {
            return Err(AuthError::MissingData);
        }

        let password_hash = self.hash_password(password)?;
        let user = User::new(
            self.id_generator.generate(),
            username.to_string(),
            phone.to_string(),
            password_hash,
        );

        // Uniqueness is enforced by the schema; the repository reports the field.
        let created = self.user_repo.create(&user).await?;

        tracing::info!(user_id = created.id, username = %created.username, "User registered");

        Ok(created)
    }

    async fn login(
        &self,
        identifier: LoginIdentifier,
        password: &str,
    ) -> Result<(User, AccessToken), AuthError> {
        if password.is_empty() {
            return Err(AuthError::MissingData);
        }

        let user = match &identifier {
            LoginIdentifier::Username(username) => {
                self.user_repo.find_by_username(username.trim()).await?
            }
            LoginIdentifier::Phone(phone) => self.user_repo.find_by_phone(phone.trim()).await?,
        }
        .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(user.id)?;

        tracing::debug!(user_id = user.id, "User logged in");

        Ok((user, token))
    }

    async fn verify_token(&self, access_token: &str) -> Result<i64, AuthError> {
        let claims = self.decode_access_token(access_token)?;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)?;

        if !self.user_repo.exists(user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        Ok(user_id)
    }
}
