//! Message Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateMessageRequest, DeleteMessageRequest};
use crate::application::dto::response::SuccessResponse;
use crate::application::services::{MessageError, MessageService};
use crate::domain::{Message, NewMessage};
use crate::infrastructure::repositories::{DocMessageRepository, DocServerRepository};
use crate::shared::error::AppError;
use crate::shared::validation::{require_str, require_text};
use crate::startup::AppState;

fn message_service(state: &AppState) -> MessageService<DocMessageRepository, DocServerRepository> {
    MessageService::new(
        Arc::new(DocMessageRepository::new(state.store.clone())),
        Arc::new(DocServerRepository::new(state.store.clone())),
    )
}

/// List a channel's messages (GET /channels/{channelId}/messages)
pub async fn get_messages(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = message_service(&state)
        .get_messages(&channel_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(messages))
}

/// Send a message (POST /channels/{channelId}/messages)
pub async fn create_message(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Json(body): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let author_id = require_str(body.author_id.as_deref(), "authorId")?;
    let author_name = require_str(body.author_name.as_deref(), "authorName")?;
    let content = require_text(body.content.as_deref(), "content")?;
    let server_id = require_str(body.server_id.as_deref(), "serverId")?;

    let message = message_service(&state)
        .create_message(
            &channel_id,
            &server_id,
            NewMessage {
                author_id,
                author_name,
                author_avatar_url: body.author_avatar_url,
                content,
            },
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Delete a message (DELETE /channels/{channelId}/messages/{messageId})
pub async fn delete_message(
    State(state): State<AppState>,
    Path((channel_id, message_id)): Path<(String, String)>,
    Json(body): Json<DeleteMessageRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let author_id = require_str(body.author_id.as_deref(), "authorId")?;
    let server_id = require_str(body.server_id.as_deref(), "serverId")?;

    message_service(&state)
        .delete_message(&channel_id, &message_id, &author_id, &server_id)
        .await
        .map_err(|e| match e {
            MessageError::NotFound => AppError::NotFound("Message not found".into()),
            MessageError::NotAuthor => AppError::Forbidden(e.to_string()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(SuccessResponse::new("Message deleted successfully")))
}
