//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. Every `TestApp` owns a
//! private in-memory SQLite database with migrations applied.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use messaging_backend::application::services::{AuthService, AuthServiceImpl, LoginIdentifier};
use messaging_backend::config::{
    CorsSettings, DatabaseSettings, DocsSettings, EmailSettings, JwtSettings, MessageSettings,
    ServerSettings, Settings, SnowflakeSettings, WebSocketSettings,
};
use messaging_backend::domain::{Chat, ChatRepository, User, UserRepository};
use messaging_backend::infrastructure::database;
use messaging_backend::infrastructure::repositories::{SqliteChatRepository, SqliteUserRepository};
use messaging_backend::shared::snowflake::DEFAULT_EPOCH;
use messaging_backend::startup::{build_router, AppState};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Settings for an isolated in-memory instance
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 5000,
        },
        database: DatabaseSettings {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            acquire_timeout: 5,
            run_migrations: true,
        },
        jwt: JwtSettings {
            secret: TEST_JWT_SECRET.into(),
            access_token_expiry_minutes: 60,
        },
        snowflake: SnowflakeSettings {
            machine_id: 1,
            epoch: DEFAULT_EPOCH,
        },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:5173".into()],
        },
        websocket: WebSocketSettings {
            max_message_size: 65536,
        },
        messages: MessageSettings {
            default_page_size: 20,
            max_page_size: 100,
        },
        email: EmailSettings::default(),
        docs: DocsSettings {
            enabled: true,
            public_url: None,
        },
        environment: "test".into(),
    }
}

/// A registered user together with a valid bearer token
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over a fresh database
    pub async fn new() -> Self {
        Self::with_settings(test_settings()).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        let db = database::create_pool(&settings.database)
            .await
            .expect("in-memory pool");
        database::run_migrations(&db).await.expect("migrations");

        let state = AppState::new(db, settings);
        let router = build_router(state.clone());

        Self { router, state }
    }

    fn auth_service(&self) -> AuthServiceImpl<SqliteUserRepository> {
        AuthServiceImpl::new(
            Arc::new(SqliteUserRepository::new(self.state.db.clone())),
            self.state.ids.clone(),
            self.state.settings.jwt.clone(),
        )
    }

    /// Register a user directly through the service layer and log them in
    pub async fn create_user(&self, username: &str, phone: &str) -> TestUser {
        let auth = self.auth_service();
        auth.register(username, phone, TEST_PASSWORD)
            .await
            .expect("register");
        let (user, token) = auth
            .login(LoginIdentifier::Username(username.into()), TEST_PASSWORD)
            .await
            .expect("login");

        TestUser {
            user,
            token: token.token,
        }
    }

    /// Create a chat with the given participants
    pub async fn create_chat(&self, participant_ids: &[i64]) -> i64 {
        let chat = Chat {
            id: self.state.ids.generate(),
            participant_ids: participant_ids.to_vec(),
            created_at: Utc::now(),
        };
        SqliteChatRepository::new(self.state.db.clone())
            .create(&chat)
            .await
            .expect("create chat")
            .id
    }

    pub async fn delete_user(&self, user_id: i64) {
        SqliteUserRepository::new(self.state.db.clone())
            .delete(user_id)
            .await
            .expect("delete user");
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.expect("router")
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// `GET /api/msgs` with the chat and viewer headers
    pub async fn get_messages(&self, chat_id: i64, user_id: Option<i64>, query: &str) -> Response {
        let mut builder = Request::builder()
            .method("GET")
            .uri(format!("/api/msgs{}", query))
            .header("id", chat_id.to_string());
        if let Some(user_id) = user_id {
            builder = builder.header("userId", user_id.to_string());
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// `POST /api/msgs` as the given sender
    pub async fn send_message(&self, chat_id: i64, sender_id: i64, text: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/api/msgs")
                .header("Content-Type", "application/json")
                .header("id", chat_id.to_string())
                .header("userId", sender_id.to_string())
                .body(Body::from(serde_json::json!({ "text": text }).to_string()))
                .unwrap(),
        )
        .await
    }

    /// `PUT /api/profile` with an optional raw Authorization header value
    pub async fn put_profile(&self, authorization: Option<&str>, body: &Value) -> Response {
        let mut builder = Request::builder()
            .method("PUT")
            .uri("/api/profile")
            .header("Content-Type", "application/json");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

/// Read a response as JSON, asserting the status first
pub async fn json_body(response: Response, expected: StatusCode) -> Value {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(
        status,
        expected,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&bytes)
    );
    serde_json::from_slice(&bytes).expect("json body")
}

/// Read a response body as text
pub async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Generate a unique test username
pub fn unique_username() -> String {
    format!("user_{}", &uuid::Uuid::new_v4().simple().to_string()[..8])
}

/// Generate a unique test phone number
pub fn unique_phone() -> String {
    format!("+1555{}", &uuid::Uuid::new_v4().as_u128().to_string()[..7])
}
