//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. Tests run against the
//! real router wired to the in-memory document store, with tokens minted
//! from the test secret.

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use chat_backend::config::{
    CorsSettings, DatabaseSettings, JwtSettings, ServerSettings, Settings,
};
use chat_backend::infrastructure::store::{DocumentStore, MemoryDocumentStore};
use chat_backend::presentation::http::routes;
use chat_backend::presentation::middleware::Claims;
use chat_backend::startup::AppState;

/// Signing secret used by the test identity provider.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Settings for tests; the database URL is never dialed because tests run on
/// the in-memory store.
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://localhost/unused".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 5,
        },
        jwt: JwtSettings {
            secret: TEST_JWT_SECRET.into(),
        },
        cors: CorsSettings {
            allowed_origins: Vec::new(),
        },
        environment: "test".into(),
    }
}

/// Mint a bearer token for the given user id.
pub fn mint_token(user_id: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token encoding")
}

/// Test application: the real router over a document store.
pub struct TestApp {
    pub router: Router,
    pub token: String,
}

impl TestApp {
    /// Create a test application backed by a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryDocumentStore::new()))
    }

    /// Create a test application over a specific store implementation.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let state = AppState::new(store, Arc::new(test_settings()));
        Self {
            router: routes::create_router(state),
            token: mint_token("test-user"),
        }
    }

    /// Send a request; `token` defaults to the app's own bearer token.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(value) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Authenticated GET request.
    pub async fn get(&self, uri: &str) -> Response {
        self.request("GET", uri, None, Some(self.token.as_str())).await
    }

    /// Authenticated POST request with JSON body.
    pub async fn post_json(&self, uri: &str, body: Value) -> Response {
        self.request("POST", uri, Some(body), Some(self.token.as_str()))
            .await
    }

    /// Authenticated DELETE request with JSON body.
    pub async fn delete_json(&self, uri: &str, body: Value) -> Response {
        self.request("DELETE", uri, Some(body), Some(self.token.as_str()))
            .await
    }
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
