//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod error;
pub mod snowflake;
pub mod time;
pub mod validation;
