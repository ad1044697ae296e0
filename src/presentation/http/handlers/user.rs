//! User Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::request::UpsertUserRequest;
use crate::application::services::{UserError, UserService};
use crate::domain::User;
use crate::infrastructure::repositories::DocUserRepository;
use crate::shared::error::AppError;
use crate::shared::validation::{require_str, require_text};
use crate::startup::AppState;

fn user_service(state: &AppState) -> UserService<DocUserRepository> {
    UserService::new(Arc::new(DocUserRepository::new(state.store.clone())))
}

/// Create or update a user (POST /users). Returns 200 for both cases since
/// the operation is an upsert.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(body): Json<UpsertUserRequest>,
) -> Result<Json<User>, AppError> {
    let user_id = require_str(body.user_id.as_deref(), "userId")?;
    let username = require_text(body.username.as_deref(), "username")?;

    let user = user_service(&state)
        .upsert_user(&user_id, &username, body.profile_photo_url)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(user))
}

/// Get a user by id (GET /users/{userId})
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = user_service(&state)
        .get_user(&user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound => AppError::NotFound("User not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(user))
}
