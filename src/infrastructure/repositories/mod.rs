//! Repository Implementations
//!
//! SQLite implementations of domain repository traits.
//!
//! - **SqliteUserRepository** - User accounts and profiles
//! - **SqliteChatRepository** - Chats with their participant lists
//! - **SqliteMessageRepository** - Message storage with keyset pagination; moves
//!   the sender's read marker in the same transaction
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::SqlitePool;
//! use crate::infrastructure::repositories::{SqliteMessageRepository, SqliteUserRepository};
//!
//! async fn setup_repositories(pool: SqlitePool) {
//!     let user_repo = SqliteUserRepository::new(pool.clone());
//!     let message_repo = SqliteMessageRepository::new(pool.clone());
//! }
//! ```

pub mod chat_repository;
pub mod message_repository;
mod read_status_repository;
pub mod user_repository;

pub use chat_repository::SqliteChatRepository;
pub use message_repository::SqliteMessageRepository;
pub use user_repository::SqliteUserRepository;
