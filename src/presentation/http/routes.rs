//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{
    auth_middleware, create_security_headers_layer, track_metrics,
};
use crate::presentation::middleware::{cors, logging};
use crate::presentation::websocket::ws_handler;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main API router with every middleware layer applied
pub fn create_router(state: AppState) -> Router {
    let settings = state.settings.clone();

    Router::new()
        .nest("/api", api_routes(state.clone()))
        .merge(account_routes())
        // WebSocket relay endpoint
        .route("/ws", get(ws_handler))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        // Security headers wrap everything below, including error responses
        .layer(create_security_headers_layer(&settings.environment))
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer(&settings.cors))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Result<impl IntoResponse, AppError> {
    let metrics = metrics::gather_metrics().map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    ))
}

/// Routes under `/api`
fn api_routes(state: AppState) -> Router<AppState> {
    let docs_enabled = state.settings.docs.enabled;

    let router = Router::new()
        .route(
            "/msgs",
            get(handlers::message::get_messages).post(handlers::message::send_message),
        )
        .merge(profile_routes(state));

    if docs_enabled {
        router
            .route("/docs", get(handlers::docs::swagger_ui))
            .route("/docs/swagger.json", get(handlers::docs::openapi_json))
    } else {
        router
    }
}

/// Profile routes (protected)
fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", put(handlers::profile::update_profile))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Registration, login and the account flows that are routed but not built yet
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/verifyReg", post(handlers::auth::verify_registration))
        .route("/requestOtp", post(handlers::auth::request_otp))
        .route("/verifyOtp", post(handlers::auth::verify_otp))
        .route("/forgotPassword", post(handlers::auth::forgot_password))
        .route("/resetPassword", post(handlers::auth::reset_password))
}
