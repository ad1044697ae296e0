//! Server Handlers
//!
//! Listing/creation, invite generation, the join flow and audit log
//! retrieval. Handlers act on body-supplied user ids: the bearer token gate
//! authenticates the caller, it does not authorize these operations.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    CreateInviteRequest, CreateServerRequest, JoinServerRequest, LogsQueryParams,
    ServersQueryParams,
};
use crate::application::dto::response::{
    InviteResponse, JoinServerResponse, ServerListResponse, ServerLogsResponse,
};
use crate::application::services::{
    CreateServerDto, InviteError, InviteService, LogQuery, ServerError, ServerService,
};
use crate::domain::{Server, ServerOrder};
use crate::infrastructure::repositories::DocServerRepository;
use crate::shared::error::AppError;
use crate::shared::validation::{require_str, require_text};
use crate::startup::AppState;

fn server_service(state: &AppState) -> ServerService<DocServerRepository> {
    ServerService::new(Arc::new(DocServerRepository::new(state.store.clone())))
}

fn invite_service(state: &AppState) -> InviteService<DocServerRepository> {
    InviteService::new(Arc::new(DocServerRepository::new(state.store.clone())))
}

/// List servers the user is a member of (GET /servers)
pub async fn get_servers(
    State(state): State<AppState>,
    Query(params): Query<ServersQueryParams>,
) -> Result<Json<ServerListResponse>, AppError> {
    let user_id = require_str(params.user_id.as_deref(), "userId")?;

    let service = server_service(&state);
    let order = params.order_by.as_deref().and_then(ServerOrder::parse);

    let (servers, descending) = match order {
        Some(order) => {
            let descending = params.descending.unwrap_or(false);
            let servers = service
                .get_servers_ordered(&user_id, order, descending)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            (servers, Some(descending))
        }
        // Unknown orderBy values are ignored, not rejected.
        None => {
            let servers = service
                .get_servers(&user_id)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?;
            (servers, None)
        }
    };

    Ok(Json(ServerListResponse {
        user_id,
        order_by: params.order_by,
        descending,
        servers,
    }))
}

/// Create a server (POST /servers)
pub async fn create_server(
    State(state): State<AppState>,
    Json(body): Json<CreateServerRequest>,
) -> Result<(StatusCode, Json<Server>), AppError> {
    let name = require_text(body.name.as_deref(), "name")?;
    let owner_id = require_str(body.owner_id.as_deref(), "ownerId")?;

    let server = server_service(&state)
        .create_server(CreateServerDto {
            name,
            owner_id,
            image_url: body.image_url,
            member_ids: body.member_ids,
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(server)))
}

/// Generate an invite link (POST /servers/{serverId}/invite)
pub async fn create_invite(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Json(body): Json<CreateInviteRequest>,
) -> Result<Json<InviteResponse>, AppError> {
    let inviter_id = require_str(body.inviter_id.as_deref(), "inviterId")?;

    let invite = invite_service(&state)
        .create_invite(&server_id, &inviter_id)
        .await
        .map_err(|e| match e {
            InviteError::ServerNotFound => AppError::NotFound("Server not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(InviteResponse::from(invite)))
}

/// Join a server via an invite hash (POST /servers/join)
pub async fn join_server(
    State(state): State<AppState>,
    Json(body): Json<JoinServerRequest>,
) -> Result<Json<JoinServerResponse>, AppError> {
    let user_id = require_str(body.user_id.as_deref(), "userId")?;
    let server_id = require_str(body.server_id.as_deref(), "serverId")?;
    let hash = require_str(body.hash.as_deref(), "hash")?;

    invite_service(&state)
        .join_server(&user_id, &server_id, body.inviter_id.as_deref(), &hash)
        .await
        .map_err(|e| match e {
            InviteError::ServerNotFound => AppError::NotFound("Server not found".into()),
            InviteError::InvalidHash => AppError::Forbidden("Invalid invitation hash".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(JoinServerResponse {
        success: true,
        message: "Successfully joined server",
        server_id,
        inviter_id: body.inviter_id,
    }))
}

/// Retrieve a server's audit log (GET /servers/{serverId}/logs)
pub async fn get_server_logs(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(params): Query<LogsQueryParams>,
) -> Result<Json<ServerLogsResponse>, AppError> {
    let logs = server_service(&state)
        .get_logs(
            &server_id,
            LogQuery {
                log_type: params.log_type,
                user_id: params.user_id,
                limit: params.limit,
            },
        )
        .await
        .map_err(|e| match e {
            ServerError::NotFound => AppError::NotFound("Server not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(ServerLogsResponse {
        server_id,
        count: logs.len(),
        logs,
    }))
}
