//! Health Check Handler
//!
//! `GET /health` reports whether the process is up and the document store is
//! reachable. The endpoint sits outside the authentication gate.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::application::dto::response::HealthResponse;
use crate::startup::AppState;

/// Basic health check: 200 when the store answers, 500 otherwise.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_status = match state.store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!("Document store unreachable: {}", e);
            "error"
        }
    };

    let status_code = if store_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        status: "started",
        store_status,
        time: Utc::now().to_rfc3339(),
    };

    (status_code, Json(response))
}
