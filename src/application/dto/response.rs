//! Response DTOs
//!
//! Envelope responses that wrap or reduce entities. Plain entity responses
//! (User, Server, Channel, Message) serialize the entities directly.

use serde::Serialize;

use crate::application::services::InviteDto;
use crate::domain::{LogEntry, PublicServer};

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub store_status: &'static str,
    /// Current time, RFC 3339
    pub time: String,
}

/// GET /servers envelope, echoing the query parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerListResponse {
    pub user_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Present only when an ordering was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,

    pub servers: Vec<PublicServer>,
}

/// Generated invite response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub hash: String,
    pub server_id: String,
    pub inviter_id: String,
    pub invite_link: String,
}

impl From<InviteDto> for InviteResponse {
    fn from(dto: InviteDto) -> Self {
        Self {
            hash: dto.hash,
            server_id: dto.server_id,
            inviter_id: dto.inviter_id,
            invite_link: dto.invite_link,
        }
    }
}

/// Join confirmation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinServerResponse {
    pub success: bool,
    pub message: &'static str,
    pub server_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inviter_id: Option<String>,
}

/// Audit log listing response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerLogsResponse {
    pub server_id: String,
    pub count: usize,
    pub logs: Vec<LogEntry>,
}

/// Generic `{success, message}` acknowledgement
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SuccessResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
