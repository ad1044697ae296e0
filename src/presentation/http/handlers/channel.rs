//! Channel Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::CreateChannelRequest;
use crate::application::services::ChannelService;
use crate::domain::Channel;
use crate::infrastructure::repositories::{DocChannelRepository, DocServerRepository};
use crate::shared::error::AppError;
use crate::shared::validation::{require_str, require_text};
use crate::startup::AppState;

fn channel_service(state: &AppState) -> ChannelService<DocChannelRepository, DocServerRepository> {
    ChannelService::new(
        Arc::new(DocChannelRepository::new(state.store.clone())),
        Arc::new(DocServerRepository::new(state.store.clone())),
    )
}

/// List a server's channels (GET /servers/{serverId}/channels)
pub async fn get_channels(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
) -> Result<Json<Vec<Channel>>, AppError> {
    let channels = channel_service(&state)
        .get_channels(&server_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(channels))
}

/// Create a channel (POST /servers/{serverId}/channels)
pub async fn create_channel(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Json(body): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<Channel>), AppError> {
    let name = require_text(body.name.as_deref(), "name")?;
    let user_id = require_str(body.user_id.as_deref(), "userId")?;

    let channel = channel_service(&state)
        .create_channel(&server_id, &name, &user_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(channel)))
}
