//! Invite Service
//!
//! Hash-based invite links and the join flow. The hash is a deterministic
//! SHA-256 digest of `ownerId ++ serverId`, no salt and no secret, so a
//! link is only as unguessable as the two ids. See DESIGN.md.

use std::sync::Arc;

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::domain::{LogAction, LogType, NewLogEntry, ServerRepository};

/// Generate the invite hash for a server.
pub fn generate_invite_hash(owner_id: &str, server_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(owner_id.as_bytes());
    hasher.update(server_id.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check an invite hash against the recomputed value.
pub fn verify_invite_hash(hash: &str, owner_id: &str, server_id: &str) -> bool {
    hash == generate_invite_hash(owner_id, server_id)
}

/// A generated invite.
#[derive(Debug, Clone)]
pub struct InviteDto {
    pub hash: String,
    pub server_id: String,
    pub inviter_id: String,
    /// Shareable link payload: `hash ++ serverId ++ inviterId`
    pub invite_link: String,
}

/// Invite service errors
#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("Server not found")]
    ServerNotFound,

    #[error("Invalid invitation hash")]
    InvalidHash,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Invite creation and the join flow.
pub struct InviteService<S>
where
    S: ServerRepository,
{
    servers: Arc<S>,
}

impl<S> InviteService<S>
where
    S: ServerRepository,
{
    pub fn new(servers: Arc<S>) -> Self {
        Self { servers }
    }

    /// Generate an invite for a server. The inviter must be a member of the
    /// server; otherwise the server is, from their point of view, not found.
    pub async fn create_invite(
        &self,
        server_id: &str,
        inviter_id: &str,
    ) -> Result<InviteDto, InviteError> {
        let servers = self
            .servers
            .find_by_member(inviter_id)
            .await
            .map_err(|e| InviteError::Internal(e.to_string()))?;

        let server = servers
            .into_iter()
            .find(|s| s.id == server_id)
            .ok_or(InviteError::ServerNotFound)?;

        let hash = generate_invite_hash(&server.owner_id, server_id);
        let invite_link = format!("{hash}{server_id}{inviter_id}");

        self.servers
            .append_log(
                server_id,
                NewLogEntry {
                    log_type: LogType::Invitation,
                    action: LogAction::Invited,
                    user_id: inviter_id.to_string(),
                    target_id: None,
                    metadata: Some(json!({ "hash": hash.clone() })),
                },
            )
            .await
            .map_err(|e| InviteError::Internal(e.to_string()))?;

        Ok(InviteDto {
            hash,
            server_id: server_id.to_string(),
            inviter_id: inviter_id.to_string(),
            invite_link,
        })
    }

    /// Join a server with an invite hash.
    ///
    /// Verifies the hash against the server's owner, adds the user to the
    /// member list (a no-op when already a member) and records the join in
    /// the audit log.
    pub async fn join_server(
        &self,
        user_id: &str,
        server_id: &str,
        inviter_id: Option<&str>,
        hash: &str,
    ) -> Result<(), InviteError> {
        let server = self
            .servers
            .find_by_id(server_id)
            .await
            .map_err(|e| InviteError::Internal(e.to_string()))?
            .ok_or(InviteError::ServerNotFound)?;

        if !verify_invite_hash(hash, &server.owner_id, server_id) {
            return Err(InviteError::InvalidHash);
        }

        if !server.is_member(user_id) {
            let mut member_ids = server.member_ids;
            member_ids.push(user_id.to_string());
            self.servers
                .update_members(server_id, &member_ids)
                .await
                .map_err(|e| InviteError::Internal(e.to_string()))?;
        }

        self.servers
            .append_log(
                server_id,
                NewLogEntry {
                    log_type: LogType::Invitation,
                    action: LogAction::Joined,
                    user_id: user_id.to_string(),
                    target_id: None,
                    metadata: inviter_id.map(|id| json!({ "inviterId": id })),
                },
            )
            .await
            .map_err(|e| InviteError::Internal(e.to_string()))?;

        Ok(())
    }
}
