//! Infrastructure Layer
//!
//! Contains implementations for external concerns:
//! - SQLite connection pool and migrations
//! - Repository implementations of the domain traits
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
