//! Reaction Handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::ReactionRequest;
use crate::application::dto::response::SuccessResponse;
use crate::application::services::ReactionService;
use crate::domain::EmojiReactions;
use crate::infrastructure::repositories::DocReactionRepository;
use crate::shared::error::AppError;
use crate::shared::validation::{require_str, require_text};
use crate::startup::AppState;

fn reaction_service(state: &AppState) -> ReactionService<DocReactionRepository> {
    ReactionService::new(Arc::new(DocReactionRepository::new(state.store.clone())))
}

/// Reaction summary for a message (GET /messages/{messageId}/reactions)
pub async fn get_reactions(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<BTreeMap<String, EmojiReactions>>, AppError> {
    let summary = reaction_service(&state)
        .get_reactions(&message_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(summary))
}

/// Add a reaction (POST /messages/{messageId}/reactions)
pub async fn add_reaction(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Json(body): Json<ReactionRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), AppError> {
    let user_id = require_str(body.user_id.as_deref(), "userId")?;
    let emoji = require_text(body.emoji.as_deref(), "emoji")?;

    reaction_service(&state)
        .add_reaction(&message_id, &user_id, &emoji)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new("Reaction added successfully")),
    ))
}

/// Remove a reaction (DELETE /messages/{messageId}/reactions)
pub async fn remove_reaction(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Json(body): Json<ReactionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_id = require_str(body.user_id.as_deref(), "userId")?;
    let emoji = require_text(body.emoji.as_deref(), "emoji")?;

    reaction_service(&state)
        .remove_reaction(&message_id, &user_id, &emoji)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(SuccessResponse::new("Reaction removed successfully")))
}
