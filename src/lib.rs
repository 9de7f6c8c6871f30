//! # Messaging Backend Library
//!
//! This crate provides a chat messaging backend with:
//! - User registration and bearer-token authentication
//! - Cursor-paginated chat history and message sending with read tracking
//! - Partial profile updates
//! - A WebSocket relay that rebroadcasts chat events to connected clients
//! - SQLite for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: SQLite repositories and metrics
//! - **Presentation Layer**: HTTP handlers, middleware and the WebSocket relay
//!
//! ## Module Structure
//!
//! ```text
//! messaging_backend/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities and repository traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ SQLite and metrics implementations
//! +-- presentation/   HTTP routes and WebSocket relay
//! +-- shared/         Common utilities (errors, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
