//! # Messaging Backend
//!
//! Application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - SQLite connection pool and migrations
//! - HTTP/WebSocket server

use anyhow::Result;
use tracing::info;

use messaging_backend::config::Settings;
use messaging_backend::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for structured logging
    messaging_backend::telemetry::init_tracing();

    info!("Starting Messaging Backend...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
