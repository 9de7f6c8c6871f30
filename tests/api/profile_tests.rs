//! Profile API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::common::{json_body, TestApp, TestUser};

fn bearer(user: &TestUser) -> String {
    format!("Bearer {}", user.token)
}

#[tokio::test]
async fn test_update_only_username() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15552001").await;

    let json = json_body(
        app.put_profile(Some(&bearer(&alice)), &json!({ "username": "alice2" }))
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["message"], "Profile updated successfully");
    assert_eq!(json["user"]["username"], "alice2");
    assert_eq!(json["user"]["phone"], "+15552001");
    assert!(json["user"]["email"].is_null());
    assert_eq!(json["user"]["isOnline"], false);
}

#[tokio::test]
async fn test_update_several_fields_then_clear_one() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15552002").await;

    let json = json_body(
        app.put_profile(
            Some(&bearer(&alice)),
            &json!({
                "email": "alice@example.com",
                "about": "hello there",
                "profilePic": "https://cdn.example.com/a.png",
                "isOnline": true,
                "lastSeen": "2024-06-01T12:00:00Z"
            }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["about"], "hello there");
    assert_eq!(json["user"]["isOnline"], true);
    assert!(json["user"]["lastSeen"]
        .as_str()
        .unwrap()
        .starts_with("2024-06-01T12:00:00"));

    let json = json_body(
        app.put_profile(Some(&bearer(&alice)), &json!({ "about": null }))
            .await,
        StatusCode::OK,
    )
    .await;
    assert!(json["user"]["about"].is_null());
    assert_eq!(json["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_empty_update_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15552003").await;

    let json = json_body(
        app.put_profile(Some(&bearer(&alice)), &json!({})).await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    assert_eq!(json["message"], "No data provided for update");
}

#[test_case(json!({ "email": "not-an-email" }) ; "bad email")]
#[test_case(json!({ "profilePic": "not a url" }) ; "bad url")]
#[test_case(json!({ "username": "  " }) ; "blank username")]
#[test_case(json!({ "username": null }) ; "null username")]
#[test_case(json!({ "isOnline": "yes" }) ; "wrong type")]
#[tokio::test]
async fn test_invalid_values_rejected(body: serde_json::Value) {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15552004").await;

    let response = app.put_profile(Some(&bearer(&alice)), &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15552005").await;
    app.create_user("bob", "+15552006").await;

    let json = json_body(
        app.put_profile(Some(&bearer(&alice)), &json!({ "username": "bob" }))
            .await,
        StatusCode::BAD_REQUEST,
    )
    .await;

    assert_eq!(json["errors"][0]["field"], "username");
}

#[tokio::test]
async fn test_update_applies_to_token_owner_only() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15552007").await;
    let bob = app.create_user("bob", "+15552008").await;

    let json = json_body(
        app.put_profile(Some(&bearer(&bob)), &json!({ "about": "bob here" }))
            .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["user"]["id"], bob.id().to_string());
    assert_ne!(json["user"]["id"], alice.id().to_string());
}

#[tokio::test]
async fn test_concurrent_updates_to_different_fields_both_persist() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", "+15552009").await;
    let auth = bearer(&alice);

    for i in 0..10 {
        let username = json!({ "username": format!("alice_{i}") });
        let about = json!({ "about": format!("about {i}") });
        let (a, b) = tokio::join!(
            app.put_profile(Some(&auth), &username),
            app.put_profile(Some(&auth), &about),
        );
        assert_eq!(a.status(), StatusCode::OK);
        assert_eq!(b.status(), StatusCode::OK);

        let stored: (String, Option<String>) =
            sqlx::query_as("SELECT username, about FROM users WHERE id = ?")
                .bind(alice.id())
                .fetch_one(&app.state.db)
                .await
                .unwrap();
        assert_eq!(stored, (format!("alice_{i}"), Some(format!("about {i}"))));
    }
}
