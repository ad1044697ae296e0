//! Store Failure Tests
//!
//! Exercise the StoreUnavailable path: every store failure surfaces as a 500
//! with the generic body, never the underlying error.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use mockall::mock;
use serde_json::{json, Value};

use chat_backend::infrastructure::store::{DocumentStore, Filter, OrderBy, StoreError};

use crate::common::{body_json, TestApp};

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;
        async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError>;
        async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;
        async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
        async fn query(
            &self,
            collection: &str,
            filter: Option<Filter>,
            order: Option<OrderBy>,
        ) -> Result<Vec<Value>, StoreError>;
        async fn ping(&self) -> Result<(), StoreError>;
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable(sqlx::Error::PoolClosed)
}

#[tokio::test]
async fn unreachable_store_turns_health_red() {
    let mut store = MockStore::new();
    store.expect_ping().returning(|| Err(unavailable()));
    let app = TestApp::with_store(Arc::new(store));

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["status"], "started");
    assert_eq!(body["storeStatus"], "error");
}

#[tokio::test]
async fn store_failures_surface_as_generic_500s() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_, _| Err(unavailable()));
    let app = TestApp::with_store(Arc::new(store));

    let response = app
        .post_json("/users", json!({ "userId": "u1", "username": "ada" }))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!(true));
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn failing_queries_do_not_leak_details() {
    let mut store = MockStore::new();
    store
        .expect_query()
        .returning(|_, _, _| Err(unavailable()));
    let app = TestApp::with_store(Arc::new(store));

    let response = app.get("/servers?userId=u1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
    assert!(!body["message"].as_str().unwrap().contains("Pool"));
}
