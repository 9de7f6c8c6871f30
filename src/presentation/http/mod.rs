//! HTTP Surface
//!
//! Routes, handlers, and request extractors.

pub mod extractors;
pub mod handlers;
pub mod routes;
