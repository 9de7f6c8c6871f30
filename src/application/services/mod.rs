//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, JWT verification
//! - **MessageService**: Chat history paging and message sending
//! - **ProfileService**: Partial profile updates

pub mod auth_service;
pub mod message_service;
pub mod profile_service;

// Re-export auth service types
pub use auth_service::{AccessToken, AuthError, AuthService, AuthServiceImpl, Claims, LoginIdentifier};

// Re-export message service types
pub use message_service::{
    MessageError, MessagePage, MessagePublisher, MessageService, MessageServiceImpl,
};

// Re-export profile service types
pub use profile_service::{ProfileError, ProfileService, ProfileServiceImpl, ProfileUpdate};
