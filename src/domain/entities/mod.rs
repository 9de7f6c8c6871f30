//! # Domain Entities
//!
//! Core domain entities. All entities map directly to their corresponding
//! database tables.
//!
//! - **User**: account with credentials and public profile
//! - **Chat**: a conversation and its participants
//! - **Message**: a text message sent in a chat
//! - **ChatReadStatus**: per-(chat, user) read marker
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod chat;
mod message;
mod read_status;
mod user;

pub use chat::{Chat, ChatRepository};
pub use message::{Message, MessageRepository};
pub use read_status::ChatReadStatus;
pub use user::{ProfileUpdate, User, UserRepository};

#[cfg(test)]
pub use chat::MockChatRepository;
#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use user::MockUserRepository;
