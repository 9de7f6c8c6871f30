//! API Endpoint Tests

mod health_tests;
mod message_tests;
mod profile_tests;
