//! Database Module
//!
//! SQLite connection pool and embedded migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseSettings;

/// Create a SQLite connection pool
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let mut options = SqliteConnectOptions::from_str(&settings.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout));

    let pool_options = if settings.is_in_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options = options.journal_mode(SqliteJournalMode::Wal);
        pool_options.max_connections(settings.max_connections)
    };

    pool_options.connect_with(options).await
}

/// Create the directory holding a file-backed database, if any.
pub fn ensure_parent_dir(settings: &DatabaseSettings) -> std::io::Result<()> {
    if settings.is_in_memory() {
        return Ok(());
    }
    let path = settings
        .url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    match std::path::Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Unique-constraint failures name the column as `table.column`.
pub(crate) fn unique_violation_field(error: &sqlx::Error) -> Option<String> {
    match error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            let message = db_err.message();
            let field = message
                .rsplit(':')
                .next()
                .and_then(|cols| cols.split(',').next())
                .and_then(|col| col.trim().rsplit('.').next())
                .unwrap_or("unknown");
            Some(field.to_string())
        }
        _ => None,
    }
}
