//! Health, Docs and Metrics Endpoint Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{json_body, test_settings, text_body, TestApp};

/// Test basic health check endpoint returns the process summary
#[tokio::test]
async fn test_health_check_returns_summary() {
    let app = TestApp::new().await;

    let json = json_body(app.get("/health").await, StatusCode::OK).await;

    assert_eq!(json["status"], "OK");
    assert_eq!(json["websockets"], true);
    assert_eq!(json["database"], "SQLite");
    assert_eq!(json["environment"], "test");
    assert_eq!(json["activeConnections"], 0);
}

/// Test readiness check reaches the database
#[tokio::test]
async fn test_readiness_reaches_database() {
    let app = TestApp::new().await;

    let json = json_body(app.get("/health/ready").await, StatusCode::OK).await;

    assert_eq!(json["status"], "ready");
    assert_eq!(json["database"]["reachable"], true);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert!(headers.get("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_security_headers_on_error_responses() {
    let app = TestApp::new().await;

    let response = app.get("/api/msgs").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = TestApp::new().await;

    let json = json_body(app.get("/api/docs/swagger.json").await, StatusCode::OK).await;

    assert_eq!(json["openapi"], "3.0.0");
    assert_eq!(json["info"]["title"], "Messaging API");
    assert_eq!(
        json["components"]["securitySchemes"]["bearerAuth"]["scheme"],
        "bearer"
    );
    for path in ["/api/msgs", "/api/profile", "/register", "/login"] {
        assert!(json["paths"].get(path).is_some(), "missing {path}");
    }
}

#[tokio::test]
async fn test_swagger_ui_served() {
    let app = TestApp::new().await;

    let response = app.get("/api/docs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = text_body(response).await;
    assert!(html.contains("SwaggerUIBundle"));
    assert!(html.contains("/api/docs/swagger.json"));
    assert!(html.contains(r##"dom_id: "#swagger-ui""##));
    assert!(html.trim_end().ends_with("</html>"));
}

#[tokio::test]
async fn test_docs_can_be_disabled() {
    let mut settings = test_settings();
    settings.docs.enabled = false;
    let app = TestApp::with_settings(settings).await;

    assert_eq!(app.get("/api/docs").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.get("/api/docs/swagger.json").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_metrics_exposes_request_counter() {
    let app = TestApp::new().await;
    app.get("/health").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = text_body(response).await;
    assert!(body.contains("messaging_backend_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;

    assert_eq!(app.get("/nope").await.status(), StatusCode::NOT_FOUND);
}
