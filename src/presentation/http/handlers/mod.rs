//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod docs;
pub mod health;
pub mod message;
pub mod profile;
