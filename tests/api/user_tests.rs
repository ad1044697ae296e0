//! User API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn upsert_requires_user_id() {
    let app = TestApp::new();

    let response = app
        .post_json("/users", json!({ "username": "ada" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "userId is required");
}

#[tokio::test]
async fn upsert_requires_a_non_blank_username() {
    let app = TestApp::new();

    let response = app
        .post_json("/users", json!({ "userId": "u1", "username": "   " }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "username is required");
}

#[tokio::test]
async fn upsert_creates_and_returns_the_user() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/users",
            json!({ "userId": "u1", "username": "  ada  " }),
        )
        .await;
    // Upserts answer 200, not 201.
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], "u1");
    assert_eq!(body["username"], "ada");
    assert!(body["profilePhotoUrl"].is_null());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn second_upsert_overwrites_the_profile_but_not_created_at() {
    let app = TestApp::new();

    let first = body_json(
        app.post_json("/users", json!({ "userId": "u1", "username": "ada" }))
            .await,
    )
    .await;

    let second = body_json(
        app.post_json(
            "/users",
            json!({ "userId": "u1", "username": "grace", "profilePhotoUrl": "g.png" }),
        )
        .await,
    )
    .await;

    assert_eq!(second["username"], "grace");
    assert_eq!(second["profilePhotoUrl"], "g.png");
    assert_eq!(second["createdAt"], first["createdAt"]);
}

#[tokio::test]
async fn get_user_returns_the_profile() {
    let app = TestApp::new();
    app.post_json("/users", json!({ "userId": "u1", "username": "ada" }))
        .await;

    let response = app.get("/users/u1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "ada");
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/users/ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "User not found");
}
