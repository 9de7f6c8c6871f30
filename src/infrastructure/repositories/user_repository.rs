//! User Repository Implementation
//!
//! SQLite implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::domain::{ProfileUpdate, User, UserRepository};
use crate::infrastructure::database::unique_violation_field;
use crate::shared::error::AppError;
use crate::shared::time::{from_millis, to_millis};

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    phone: String,
    password_hash: String,
    email: Option<String>,
    profile_pic: Option<String>,
    about: Option<String>,
    is_online: bool,
    last_seen: i64,
    created_at: i64,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            phone: self.phone,
            password_hash: self.password_hash,
            email: self.email,
            profile_pic: self.profile_pic,
            about: self.about,
            is_online: self.is_online,
            last_seen: from_millis(self.last_seen),
            created_at: from_millis(self.created_at),
        }
    }
}

const USER_COLUMNS: &str = "id, username, phone, password_hash, email, profile_pic, about, \
                            is_online, last_seen, created_at";

fn map_write_error(e: sqlx::Error) -> AppError {
    match unique_violation_field(&e) {
        Some(field) => AppError::Conflict(field),
        None => AppError::Database(e),
    }
}

/// SQLite user repository implementation.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new SqliteUserRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one_by(&self, column: &str, value: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?", USER_COLUMNS, column);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_user()))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find_one_by("username", username).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        self.find_one_by("phone", phone).await
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result)
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (id, username, phone, password_hash, email, profile_pic, about,
                               is_online, last_seen, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(&user.email)
            .bind(&user.profile_pic)
            .bind(&user.about)
            .bind(user.is_online)
            .bind(to_millis(user.last_seen))
            .bind(to_millis(user.created_at))
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(row.into_user())
    }

    async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> Result<User, AppError> {
        let not_found = || AppError::NotFound(format!("User with id {} not found", id));

        if update.is_empty() {
            return self.find_by_id(id).await?.ok_or_else(not_found);
        }

        // Absent columns never appear in the statement, so concurrent
        // updates of different fields cannot overwrite each other.
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
        let mut columns = builder.separated(", ");
        if let Some(username) = &update.username {
            columns.push("username = ").push_bind_unseparated(username.clone());
        }
        if let Some(phone) = &update.phone {
            columns.push("phone = ").push_bind_unseparated(phone.clone());
        }
        if let Some(email) = &update.email {
            columns.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(profile_pic) = &update.profile_pic {
            columns
                .push("profile_pic = ")
                .push_bind_unseparated(profile_pic.clone());
        }
        if let Some(about) = &update.about {
            columns.push("about = ").push_bind_unseparated(about.clone());
        }
        if let Some(is_online) = update.is_online {
            columns.push("is_online = ").push_bind_unseparated(is_online);
        }
        if let Some(last_seen) = update.last_seen {
            columns
                .push("last_seen = ")
                .push_bind_unseparated(to_millis(last_seen));
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING ").push(USER_COLUMNS);

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or_else(not_found)?;

        Ok(row.into_user())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        Ok(())
    }
}
