//! Health Check Handlers
//!
//! # Endpoints
//! - `GET /health` - Liveness plus a summary of the running process
//! - `GET /health/ready` - Readiness check (is the database reachable?)

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
}

/// Liveness response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub websockets: bool,
    pub database: &'static str,
    pub environment: String,
    pub active_connections: usize,
    pub uptime_seconds: u64,
    pub version: &'static str,
}

/// Readiness response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Basic health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        websockets: true,
        database: "SQLite",
        environment: state.settings.environment.clone(),
        active_connections: state.relay.connection_count(),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check - 200 if the database answers, 503 otherwise
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => DatabaseHealth {
            reachable: true,
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            DatabaseHealth {
                reachable: false,
                latency_ms: None,
            }
        }
    };

    let (status_code, status) = if database.reachable {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (status_code, Json(ReadinessResponse { status, database }))
}
