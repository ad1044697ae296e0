//! Message API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{body_json, TestApp};

async fn create_server(app: &TestApp) -> String {
    let response = app
        .post_json("/servers", json!({ "name": "Guild", "ownerId": "u1" }))
        .await;
    body_json(response).await["id"].as_str().unwrap().to_string()
}

async fn send_message(
    app: &TestApp,
    channel_id: &str,
    server_id: &str,
    author: &str,
    content: &str,
) -> Value {
    let response = app
        .post_json(
            &format!("/channels/{channel_id}/messages"),
            json!({
                "authorId": author,
                "authorName": format!("{author}-name"),
                "content": content,
                "serverId": server_id,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_validates_required_fields() {
    let app = TestApp::new();
    let server_id = create_server(&app).await;

    for (body, message) in [
        (
            json!({ "authorName": "n", "content": "hi", "serverId": server_id }),
            "authorId is required",
        ),
        (
            json!({ "authorId": "u1", "content": "hi", "serverId": server_id }),
            "authorName is required",
        ),
        (
            json!({ "authorId": "u1", "authorName": "n", "content": "  ", "serverId": server_id }),
            "content is required",
        ),
        (
            json!({ "authorId": "u1", "authorName": "n", "content": "hi" }),
            "serverId is required",
        ),
    ] {
        let response = app.post_json("/channels/c1/messages", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], message);
    }
}

#[tokio::test]
async fn created_message_defaults_avatar_to_null_and_trims_content() {
    let app = TestApp::new();
    let server_id = create_server(&app).await;

    let message = send_message(&app, "c1", &server_id, "u1", "  hello  ").await;
    assert_eq!(message["channelId"], "c1");
    assert_eq!(message["content"], "hello");
    assert!(message["authorAvatarUrl"].is_null());
    assert!(message["createdAt"].is_string());
}

#[tokio::test]
async fn messages_are_listed_oldest_first() {
    let app = TestApp::new();
    let server_id = create_server(&app).await;

    send_message(&app, "c1", &server_id, "u1", "first").await;
    send_message(&app, "c1", &server_id, "u1", "second").await;
    send_message(&app, "c2", &server_id, "u1", "other channel").await;

    let response = app.get("/channels/c1/messages").await;
    assert_eq!(response.status(), StatusCode::OK);

    let messages = body_json(response).await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);

    let timestamps: Vec<_> = messages
        .iter()
        .map(|m| m["createdAt"].as_str().unwrap().to_string())
        .collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);
}

#[tokio::test]
async fn delete_by_another_user_is_forbidden_and_keeps_the_message() {
    let app = TestApp::new();
    let server_id = create_server(&app).await;
    let message = send_message(&app, "c1", &server_id, "u1", "mine").await;

    let response = app
        .delete_json(
            &format!("/channels/c1/messages/{}", message["id"].as_str().unwrap()),
            json!({ "authorId": "u2", "serverId": server_id }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "Forbidden");

    let remaining = body_json(app.get("/channels/c1/messages").await).await;
    assert_eq!(remaining.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_by_the_author_succeeds() {
    let app = TestApp::new();
    let server_id = create_server(&app).await;
    let message = send_message(&app, "c1", &server_id, "u1", "bye").await;

    let response = app
        .delete_json(
            &format!("/channels/c1/messages/{}", message["id"].as_str().unwrap()),
            json!({ "authorId": "u1", "serverId": server_id }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], "Message deleted successfully");

    let remaining = body_json(app.get("/channels/c1/messages").await).await;
    assert!(remaining.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_message_is_not_found() {
    let app = TestApp::new();
    let server_id = create_server(&app).await;

    let response = app
        .delete_json(
            "/channels/c1/messages/ghost",
            json!({ "authorId": "u1", "serverId": server_id }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Message not found");
}

#[tokio::test]
async fn message_lifecycle_is_recorded_in_the_audit_log() {
    let app = TestApp::new();
    let server_id = create_server(&app).await;
    let message = send_message(&app, "c1", &server_id, "u1", "hello").await;

    app.delete_json(
        &format!("/channels/c1/messages/{}", message["id"].as_str().unwrap()),
        json!({ "authorId": "u1", "serverId": server_id }),
    )
    .await;

    let logs = body_json(
        app.get(&format!("/servers/{server_id}/logs?type=message"))
            .await,
    )
    .await;
    assert_eq!(logs["count"], json!(2));
    // Newest first: the deletion precedes the creation in the listing.
    assert_eq!(logs["logs"][0]["action"], "deleted");
    assert_eq!(logs["logs"][1]["action"], "created");
    assert_eq!(logs["logs"][0]["metadata"]["channelId"], "c1");
}

/// The audit append races the create: a message into a server that has no
/// document still gets created, but the request surfaces the log failure.
#[tokio::test]
async fn create_with_an_unknown_server_id_fails_after_the_write() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/channels/c1/messages",
            json!({
                "authorId": "u1",
                "authorName": "u1-name",
                "content": "orphan",
                "serverId": "ghost",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!(true));
    assert_eq!(body["message"], "Internal server error");

    // The message itself was written before the log append failed.
    let messages = body_json(app.get("/channels/c1/messages").await).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
}
