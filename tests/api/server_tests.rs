//! Server API Tests
//!
//! Covers listing/creation, the invite + join flow and audit log retrieval.

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{body_json, TestApp};

async fn create_server(app: &TestApp, name: &str, owner: &str) -> Value {
    let response = app
        .post_json("/servers", json!({ "name": name, "ownerId": owner }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn listing_requires_user_id() {
    let app = TestApp::new();

    let response = app.get("/servers").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "userId is required");
}

#[tokio::test]
async fn create_requires_name_and_owner() {
    let app = TestApp::new();

    let missing_name = app.post_json("/servers", json!({ "ownerId": "u1" })).await;
    assert_eq!(missing_name.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(missing_name).await["message"],
        "name is required"
    );

    let missing_owner = app.post_json("/servers", json!({ "name": "Guild" })).await;
    assert_eq!(missing_owner.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(missing_owner).await["message"],
        "ownerId is required"
    );
}

#[tokio::test]
async fn created_server_defaults_members_to_the_owner() {
    let app = TestApp::new();

    let server = create_server(&app, "Guild", "u1").await;
    assert_eq!(server["memberIds"], json!(["u1"]));
    assert_eq!(server["ownerId"], "u1");
    assert!(server["imageUrl"].is_null());
    assert!(server["createdAt"].is_string());
    // The create response carries no logs.
    assert!(server.get("logs").is_none());
}

#[tokio::test]
async fn member_ids_are_deduplicated_with_the_owner_first() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/servers",
            json!({
                "name": "Guild",
                "ownerId": "u1",
                "memberIds": ["u2", "u1", "u2", "u3"],
            }),
        )
        .await;
    let server = body_json(response).await;
    assert_eq!(server["memberIds"], json!(["u1", "u2", "u3"]));
}

#[tokio::test]
async fn listing_exposes_only_the_public_shape() {
    let app = TestApp::new();
    create_server(&app, "Guild", "u1").await;

    let response = app.get("/servers?userId=u1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["userId"], "u1");
    // No ordering requested: echo fields are omitted.
    assert!(body.get("orderBy").is_none());
    assert!(body.get("descending").is_none());

    let servers = body["servers"].as_array().unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0]["name"], "Guild");
    assert!(servers[0].get("memberIds").is_none());
    assert!(servers[0].get("logs").is_none());
}

#[tokio::test]
async fn listing_orders_by_name_descending() {
    let app = TestApp::new();
    for name in ["Bravo", "Alpha", "Charlie"] {
        create_server(&app, name, "u1").await;
    }

    let response = app
        .get("/servers?userId=u1&orderBy=name&descending=true")
        .await;
    let body = body_json(response).await;

    assert_eq!(body["orderBy"], "name");
    assert_eq!(body["descending"], json!(true));
    let names: Vec<_> = body["servers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Charlie", "Bravo", "Alpha"]);
}

#[tokio::test]
async fn unknown_order_by_is_ignored() {
    let app = TestApp::new();
    create_server(&app, "Guild", "u1").await;

    let response = app.get("/servers?userId=u1&orderBy=imageUrl").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    // Echoed verbatim, but no ordering was applied.
    assert_eq!(body["orderBy"], "imageUrl");
    assert!(body.get("descending").is_none());
    assert_eq!(body["servers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invite_requires_inviter_id() {
    let app = TestApp::new();
    let server = create_server(&app, "Guild", "u1").await;

    let response = app
        .post_json(
            &format!("/servers/{}/invite", server["id"].as_str().unwrap()),
            json!({}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invite_from_a_non_member_is_not_found() {
    let app = TestApp::new();
    let server = create_server(&app, "Guild", "u1").await;

    let response = app
        .post_json(
            &format!("/servers/{}/invite", server["id"].as_str().unwrap()),
            json!({ "inviterId": "outsider" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Server not found");
}

#[tokio::test]
async fn join_requires_user_server_and_hash() {
    let app = TestApp::new();

    let response = app
        .post_json("/servers/join", json!({ "userId": "u2", "serverId": "s1" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "hash is required");
}

#[tokio::test]
async fn join_unknown_server_is_not_found() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/servers/join",
            json!({ "userId": "u2", "serverId": "ghost", "hash": "deadbeef" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn join_with_a_wrong_hash_is_forbidden() {
    let app = TestApp::new();
    let server = create_server(&app, "Guild", "u1").await;

    let response = app
        .post_json(
            "/servers/join",
            json!({
                "userId": "u2",
                "serverId": server["id"],
                "hash": "0000000000000000000000000000000000000000000000000000000000000000",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Forbidden");
    assert_eq!(body["message"], "Invalid invitation hash");

    // Membership unchanged.
    let listed = body_json(app.get("/servers?userId=u2").await).await;
    assert!(listed["servers"].as_array().unwrap().is_empty());
}

/// The end-to-end flow: create -> list -> invite -> join -> both members.
#[tokio::test]
async fn invite_and_join_flow() {
    let app = TestApp::new();

    let server = create_server(&app, "Guild", "u1").await;
    let server_id = server["id"].as_str().unwrap();
    assert_eq!(server["memberIds"], json!(["u1"]));

    let listed = body_json(app.get("/servers?userId=u1").await).await;
    assert_eq!(listed["servers"][0]["id"], server["id"]);

    let invite_response = app
        .post_json(
            &format!("/servers/{server_id}/invite"),
            json!({ "inviterId": "u1" }),
        )
        .await;
    assert_eq!(invite_response.status(), StatusCode::OK);
    let invite = body_json(invite_response).await;
    let hash = invite["hash"].as_str().unwrap();
    assert_eq!(invite["serverId"], server["id"]);
    assert_eq!(invite["inviterId"], "u1");
    assert_eq!(
        invite["inviteLink"],
        json!(format!("{hash}{server_id}u1"))
    );

    let join_response = app
        .post_json(
            "/servers/join",
            json!({
                "userId": "u2",
                "serverId": server_id,
                "inviterId": "u1",
                "hash": hash,
            }),
        )
        .await;
    assert_eq!(join_response.status(), StatusCode::OK);
    let joined = body_json(join_response).await;
    assert_eq!(joined["success"], json!(true));
    assert_eq!(joined["message"], "Successfully joined server");
    assert_eq!(joined["inviterId"], "u1");

    // u2 now sees the server; joining again stays 200.
    let listed = body_json(app.get("/servers?userId=u2").await).await;
    assert_eq!(listed["servers"].as_array().unwrap().len(), 1);

    let again = app
        .post_json(
            "/servers/join",
            json!({ "userId": "u2", "serverId": server_id, "hash": hash }),
        )
        .await;
    assert_eq!(again.status(), StatusCode::OK);
    let listed = body_json(app.get("/servers?userId=u2").await).await;
    assert_eq!(listed["servers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn logs_record_the_server_lifecycle() {
    let app = TestApp::new();

    let server = create_server(&app, "Guild", "u1").await;
    let server_id = server["id"].as_str().unwrap();

    let invite = body_json(
        app.post_json(
            &format!("/servers/{server_id}/invite"),
            json!({ "inviterId": "u1" }),
        )
        .await,
    )
    .await;
    app.post_json(
        "/servers/join",
        json!({
            "userId": "u2",
            "serverId": server_id,
            "hash": invite["hash"],
        }),
    )
    .await;

    let response = app.get(&format!("/servers/{server_id}/logs")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["serverId"], json!(server_id));
    assert_eq!(body["count"], json!(3));
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 3);

    // Newest first.
    let timestamps: Vec<_> = logs
        .iter()
        .map(|l| l["timestamp"].as_str().unwrap().to_string())
        .collect();
    let mut sorted = timestamps.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(timestamps, sorted);

    // Type filter.
    let invitations = body_json(
        app.get(&format!("/servers/{server_id}/logs?type=invitation"))
            .await,
    )
    .await;
    assert_eq!(invitations["count"], json!(2));

    // User filter.
    let by_u2 = body_json(
        app.get(&format!("/servers/{server_id}/logs?userId=u2"))
            .await,
    )
    .await;
    assert_eq!(by_u2["count"], json!(1));
    assert_eq!(by_u2["logs"][0]["action"], "joined");

    // Limit.
    let limited = body_json(
        app.get(&format!("/servers/{server_id}/logs?limit=1")).await,
    )
    .await;
    assert_eq!(limited["count"], json!(1));
}

#[tokio::test]
async fn logs_of_an_unknown_server_are_not_found() {
    let app = TestApp::new();

    let response = app.get("/servers/ghost/logs").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Server not found");
}
