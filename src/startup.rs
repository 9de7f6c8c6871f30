//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::infrastructure::database;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::websocket::Relay;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub ids: Arc<SnowflakeGenerator>,
    pub relay: Arc<Relay>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Assemble state around an already migrated pool
    pub fn new(db: SqlitePool, settings: Settings) -> Self {
        let ids = Arc::new(SnowflakeGenerator::new(
            u64::from(settings.snowflake.machine_id),
            settings.snowflake.epoch,
        ));

        Self {
            db,
            ids,
            relay: Arc::new(Relay::new()),
            settings: Arc::new(settings),
        }
    }
}

/// Build the full router, middleware included, for the given state
pub fn build_router(state: AppState) -> Router {
    routes::create_router(state)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    relay: Arc<Relay>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        database::ensure_parent_dir(&settings.database)
            .context("failed to create database directory")?;

        let db = database::create_pool(&settings.database)
            .await
            .context("failed to open database")?;
        tracing::info!(url = %settings.database.url, "Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("failed to apply migrations")?;
            tracing::info!("Database migrations applied");
        }

        let addr = settings.server_addr();
        let state = AppState::new(db, settings);
        let relay = state.relay.clone();

        health::init_server_start();
        let router = build_router(state);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            relay,
        })
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run_until_stopped(self) -> Result<()> {
        let relay = self.relay;

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                tracing::info!(
                    connections = relay.connection_count(),
                    "Shutdown signal received, closing relay connections"
                );
                relay.shutdown();
            })
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
