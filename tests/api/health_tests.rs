//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn health_reports_started_when_the_store_answers() {
    let app = TestApp::new();

    // Health is outside the auth gate.
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "started");
    assert_eq!(body["storeStatus"], "ok");
    assert!(body["time"]
        .as_str()
        .unwrap()
        .parse::<chrono::DateTime<chrono::Utc>>()
        .is_ok());
}
