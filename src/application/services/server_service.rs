//! Server Service
//!
//! Handles server management: creation, membership and the append-only
//! audit log.

use std::sync::Arc;

use serde_json::json;

use crate::domain::{
    LogAction, LogEntry, LogType, NewLogEntry, NewServer, PublicServer, Server, ServerOrder,
    ServerRepository,
};

/// Create server request
#[derive(Debug, Clone)]
pub struct CreateServerDto {
    pub name: String,
    pub owner_id: String,
    pub image_url: Option<String>,
    pub member_ids: Option<Vec<String>>,
}

/// Audit log retrieval options. All filters are exact-match; `limit = 0`
/// means unlimited.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub log_type: Option<String>,
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

/// Server service errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Server not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Server management operations.
pub struct ServerService<S>
where
    S: ServerRepository,
{
    servers: Arc<S>,
}

impl<S> ServerService<S>
where
    S: ServerRepository,
{
    pub fn new(servers: Arc<S>) -> Self {
        Self { servers }
    }

    /// Create a server. The member list always contains the owner exactly
    /// once (first), with caller-supplied members deduplicated after it.
    pub async fn create_server(&self, request: CreateServerDto) -> Result<Server, ServerError> {
        let mut member_ids = vec![request.owner_id.clone()];
        for id in request.member_ids.unwrap_or_default() {
            if !member_ids.contains(&id) {
                member_ids.push(id);
            }
        }

        let server = self
            .servers
            .create(NewServer {
                name: request.name,
                owner_id: request.owner_id.clone(),
                image_url: request.image_url,
                member_ids,
            })
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        // Log failures after the create are not rolled back; the server stays.
        self.servers
            .append_log(
                &server.id,
                NewLogEntry {
                    log_type: LogType::Server,
                    action: LogAction::Created,
                    user_id: request.owner_id,
                    target_id: None,
                    metadata: Some(json!({ "serverName": server.name.clone() })),
                },
            )
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(server)
    }

    /// All servers the user is a member of, in the reduced public shape.
    pub async fn get_servers(&self, user_id: &str) -> Result<Vec<PublicServer>, ServerError> {
        let servers = self
            .servers
            .find_by_member(user_id)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(servers.into_iter().map(PublicServer::from).collect())
    }

    /// Like [`Self::get_servers`], ordered by `createdAt` or `name`.
    pub async fn get_servers_ordered(
        &self,
        user_id: &str,
        order: ServerOrder,
        descending: bool,
    ) -> Result<Vec<PublicServer>, ServerError> {
        let servers = self
            .servers
            .find_by_member_ordered(user_id, order, descending)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(servers.into_iter().map(PublicServer::from).collect())
    }

    /// Add a user to a server's member list. A no-op if already a member.
    ///
    /// Read-then-write on the whole array; concurrent adds race (last write
    /// wins) since the store has no transactions.
    pub async fn add_member(&self, server_id: &str, user_id: &str) -> Result<(), ServerError> {
        let server = self
            .servers
            .find_by_id(server_id)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .ok_or(ServerError::NotFound)?;

        if server.is_member(user_id) {
            return Ok(());
        }

        let mut member_ids = server.member_ids;
        member_ids.push(user_id.to_string());

        self.servers
            .update_members(server_id, &member_ids)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }

    /// Retrieve a server's audit log, filtered, newest first.
    pub async fn get_logs(
        &self,
        server_id: &str,
        query: LogQuery,
    ) -> Result<Vec<LogEntry>, ServerError> {
        let server = self
            .servers
            .find_by_id(server_id)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .ok_or(ServerError::NotFound)?;

        let mut logs: Vec<LogEntry> = server
            .logs
            .into_iter()
            .filter(|log| {
                query
                    .log_type
                    .as_deref()
                    .map_or(true, |t| log.log_type.as_str() == t)
            })
            .filter(|log| {
                query
                    .user_id
                    .as_deref()
                    .map_or(true, |u| log.user_id == u)
            })
            .collect();

        // Newest first; entries without a timestamp keep their position.
        logs.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
            (Some(a), Some(b)) => b.cmp(a),
            _ => std::cmp::Ordering::Equal,
        });

        if let Some(limit) = query.limit {
            if limit > 0 {
                logs.truncate(limit);
            }
        }

        Ok(logs)
    }
}
