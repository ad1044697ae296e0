//! Request DTOs
//!
//! Data structures for API request bodies and query strings. Required fields
//! are `Option`; handlers run the presence checks and answer 400 with
//! "<field> is required" when one is missing.

use serde::Deserialize;

/// Create or update a user (upsert)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub profile_photo_url: Option<String>,
}

/// Create server request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerRequest {
    pub name: Option<String>,
    pub owner_id: Option<String>,
    pub image_url: Option<String>,
    /// Initial members; the owner is added automatically
    pub member_ids: Option<Vec<String>>,
}

/// Generate an invite link
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub inviter_id: Option<String>,
}

/// Join a server via an invite hash
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinServerRequest {
    pub user_id: Option<String>,
    pub server_id: Option<String>,
    pub inviter_id: Option<String>,
    pub hash: Option<String>,
}

/// Create channel request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub name: Option<String>,
    /// Acting user, recorded in the server audit log
    pub user_id: Option<String>,
}

/// Send message request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub author_avatar_url: Option<String>,
    pub content: Option<String>,
    /// Owning server, used for the audit log only
    pub server_id: Option<String>,
}

/// Delete message request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageRequest {
    pub author_id: Option<String>,
    pub server_id: Option<String>,
}

/// Add/remove reaction request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub user_id: Option<String>,
    pub emoji: Option<String>,
}

/// GET /servers query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServersQueryParams {
    pub user_id: Option<String>,
    /// `createdAt` or `name` (case-insensitive); anything else is ignored
    pub order_by: Option<String>,
    pub descending: Option<bool>,
}

/// GET /servers/{serverId}/logs query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsQueryParams {
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}
