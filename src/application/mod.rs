//! Application Layer
//!
//! Auth, message and profile services plus the request/response DTOs
//! that the HTTP handlers exchange with them.

pub mod dto;
pub mod services;
