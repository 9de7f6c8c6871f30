//! Message API Tests

use std::collections::HashSet;

use axum::{body::Body, http::Request, http::StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::common::{json_body, test_settings, TestApp};

async fn send_ok(app: &TestApp, chat_id: i64, sender_id: i64, text: &str) -> Value {
    let json = json_body(
        app.send_message(chat_id, sender_id, text).await,
        StatusCode::CREATED,
    )
    .await;
    json["msg"].clone()
}

async fn message_count(app: &TestApp, chat_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE chat_id = ?")
        .bind(chat_id)
        .fetch_one(&app.state.db)
        .await
        .unwrap()
}

async fn last_seen(app: &TestApp, chat_id: i64, user_id: i64) -> Option<i64> {
    sqlx::query_scalar::<_, Option<i64>>(
        "SELECT last_seen_message_id FROM chat_read_status WHERE chat_id = ? AND user_id = ?",
    )
    .bind(chat_id)
    .bind(user_id)
    .fetch_optional(&app.state.db)
    .await
    .unwrap()
    .flatten()
}

fn raw_post(chat_id: i64, sender_id: i64, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/msgs")
        .header("id", chat_id.to_string())
        .header("userId", sender_id.to_string())
        .body(body)
        .unwrap()
}

fn ids_of(page: &Value) -> Vec<String> {
    page["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_send_message_returns_created_message() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551001").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    let msg = send_ok(&app, chat_id, alice.id(), "Hello world").await;

    assert_eq!(msg["content"], "Hello world");
    assert_eq!(msg["chatId"], chat_id.to_string());
    assert_eq!(msg["senderId"], alice.id().to_string());
    assert!(msg["createdAt"].is_string());
}

#[tokio::test]
async fn test_send_message_updates_sender_read_status() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551002").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    send_ok(&app, chat_id, alice.id(), "first").await;
    let latest = send_ok(&app, chat_id, alice.id(), "second").await;

    assert_eq!(
        last_seen(&app, chat_id, alice.id()).await.map(|id| id.to_string()),
        latest["id"].as_str().map(str::to_string)
    );
}

#[tokio::test]
async fn test_failed_read_status_write_rolls_back_message() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551016").await;
    let chat_id = app.create_chat(&[alice.id()]).await;
    sqlx::query("DROP TABLE chat_read_status")
        .execute(&app.state.db)
        .await
        .unwrap();

    let response = app.send_message(chat_id, alice.id(), "lost").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message_count(&app, chat_id).await, 0);
}

#[tokio::test]
async fn test_non_participant_cannot_send() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551003").await;
    let mallory = app.create_user("mallory", "+15551004").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    let response = app.send_message(chat_id, mallory.id(), "let me in").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(message_count(&app, chat_id).await, 0);
}

#[tokio::test]
async fn test_send_to_unknown_chat_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551005").await;

    let response = app.send_message(424242, alice.id(), "anyone?").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_text_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551006").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    for text in ["", "   \n\t"] {
        let json = json_body(
            app.send_message(chat_id, alice.id(), text).await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        assert_eq!(json["message"], "Missing data");
    }
    assert_eq!(message_count(&app, chat_id).await, 0);
}

#[tokio::test]
async fn test_send_without_headers_is_missing_data() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/msgs")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"text":"hi"}"#))
                .unwrap(),
        )
        .await;
    let json = json_body(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["message"], "Missing data");
}

#[tokio::test]
async fn test_get_without_chat_header_is_missing_data() {
    let app = TestApp::new().await;

    let json = json_body(app.get("/api/msgs").await, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["message"], "Missing data");
}

#[tokio::test]
async fn test_non_numeric_chat_header_rejected() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .method("GET")
                .uri("/api/msgs")
                .header("id", "not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let json = json_body(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["message"], "Invalid chat id");
}

#[tokio::test]
async fn test_pagination_visits_every_message_once() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551007").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    let mut sent = Vec::new();
    for i in 0..25 {
        let msg = send_ok(&app, chat_id, alice.id(), &format!("message {i}")).await;
        sent.push(msg["id"].as_str().unwrap().to_string());
    }

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    loop {
        let query = match &cursor {
            Some(c) => format!("?limit=10&cursor={c}"),
            None => "?limit=10".to_string(),
        };
        let page = json_body(
            app.get_messages(chat_id, None, &query).await,
            StatusCode::OK,
        )
        .await;
        pages += 1;
        seen.extend(ids_of(&page));

        match page["nextCursor"].as_str() {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    assert_eq!(pages, 3);
    sent.reverse();
    assert_eq!(seen, sent);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 25);
}

#[tokio::test]
async fn test_exact_page_boundary_has_no_next_cursor() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551008").await;
    let chat_id = app.create_chat(&[alice.id()]).await;
    for i in 0..5 {
        send_ok(&app, chat_id, alice.id(), &format!("m{i}")).await;
    }

    let page = json_body(
        app.get_messages(chat_id, None, "?limit=5").await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(ids_of(&page).len(), 5);
    assert!(page["nextCursor"].is_null());
}

#[tokio::test]
async fn test_default_limit_applies() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551009").await;
    let chat_id = app.create_chat(&[alice.id()]).await;
    for i in 0..22 {
        send_ok(&app, chat_id, alice.id(), &format!("m{i}")).await;
    }

    for query in ["", "?limit=abc", "?limit=0", "?limit=-3"] {
        let page = json_body(app.get_messages(chat_id, None, query).await, StatusCode::OK).await;
        assert_eq!(ids_of(&page).len(), 20, "query {query:?}");
        assert!(page["nextCursor"].is_string());
    }
}

#[tokio::test]
async fn test_limit_is_capped() {
    let mut settings = test_settings();
    settings.messages.default_page_size = 2;
    settings.messages.max_page_size = 4;
    let app = TestApp::with_settings(settings).await;
    let alice = app.create_user("alice", "+15551010").await;
    let chat_id = app.create_chat(&[alice.id()]).await;
    for i in 0..6 {
        send_ok(&app, chat_id, alice.id(), &format!("m{i}")).await;
    }

    let page = json_body(
        app.get_messages(chat_id, None, "?limit=1000").await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(ids_of(&page).len(), 4);
}

#[tokio::test]
async fn test_unknown_cursor_yields_empty_page() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551011").await;
    let chat_id = app.create_chat(&[alice.id()]).await;
    send_ok(&app, chat_id, alice.id(), "hello").await;

    let page = json_body(
        app.get_messages(chat_id, None, "?cursor=123").await,
        StatusCode::OK,
    )
    .await;

    assert!(ids_of(&page).is_empty());
    assert!(page["nextCursor"].is_null());
}

#[tokio::test]
async fn test_malformed_cursor_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551012").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    let json = json_body(
        app.get_messages(chat_id, None, "?cursor=abc").await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    assert_eq!(json["message"], "Invalid cursor");
}

#[tokio::test]
async fn test_empty_chat_returns_empty_page() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551013").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    let page = json_body(
        app.get_messages(chat_id, Some(alice.id()), "").await,
        StatusCode::OK,
    )
    .await;

    assert!(ids_of(&page).is_empty());
    assert!(page["nextCursor"].is_null());
}

#[tokio::test]
async fn test_get_unknown_chat_is_not_found_for_viewer() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551015").await;

    let response = app.get_messages(987654, Some(alice.id()), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let anonymous = json_body(app.get_messages(987654, None, "").await, StatusCode::OK).await;
    assert!(ids_of(&anonymous).is_empty());
}

#[tokio::test]
async fn test_two_participants_and_an_outsider() {
    let app = TestApp::new().await;
    let a = app.create_user("a_user", "+15551101").await;
    let b = app.create_user("b_user", "+15551102").await;
    let s = app.create_user("s_user", "+15551103").await;
    let chat_id = app.create_chat(&[a.id(), b.id()]).await;

    let from_a = send_ok(&app, chat_id, a.id(), "hi B").await;
    let from_b = send_ok(&app, chat_id, b.id(), "hi A").await;

    let rejected = app.send_message(chat_id, s.id(), "hello?").await;
    assert_eq!(rejected.status(), StatusCode::FORBIDDEN);

    let no_body = json_body(
        app.send(raw_post(chat_id, a.id(), Body::empty())).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(no_body["message"], "Missing data");

    let outsider_read = app.get_messages(chat_id, Some(s.id()), "").await;
    assert_eq!(outsider_read.status(), StatusCode::FORBIDDEN);

    let page = json_body(
        app.get_messages(chat_id, Some(b.id()), "").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(
        ids_of(&page),
        vec![
            from_b["id"].as_str().unwrap().to_string(),
            from_a["id"].as_str().unwrap().to_string(),
        ]
    );
    assert_eq!(message_count(&app, chat_id).await, 2);

    let first = json_body(
        app.get_messages(chat_id, Some(a.id()), "?limit=1").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(ids_of(&first), vec![from_b["id"].as_str().unwrap().to_string()]);
    let cursor = first["nextCursor"].as_str().expect("next cursor").to_string();

    let second = json_body(
        app.get_messages(chat_id, Some(a.id()), &format!("?limit=1&cursor={cursor}"))
            .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(ids_of(&second), vec![from_a["id"].as_str().unwrap().to_string()]);
    assert!(second["nextCursor"].is_null());
}

#[tokio::test]
async fn test_sent_message_reaches_joined_relay_connection() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15551014").await;
    let chat_id = app.create_chat(&[alice.id()]).await;

    let (joined_tx, mut joined_rx) = mpsc::unbounded_channel();
    let (other_tx, mut other_rx) = mpsc::unbounded_channel();
    let joined = Uuid::new_v4();
    let other = Uuid::new_v4();
    app.state.relay.register(joined, joined_tx);
    app.state.relay.register(other, other_tx);
    app.state.relay.join(joined, chat_id);

    let msg = send_ok(&app, chat_id, alice.id(), "realtime").await;

    let frame: Value = serde_json::from_str(&joined_rx.try_recv().unwrap()).unwrap();
    assert_eq!(frame["event"], "message:new");
    assert_eq!(frame["data"]["id"], msg["id"]);
    assert!(other_rx.try_recv().is_err());
}
