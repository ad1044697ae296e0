//! Channel Service
//!
//! Handles channel operations within a server.

use std::sync::Arc;

use serde_json::json;

use crate::domain::{
    Channel, ChannelRepository, LogAction, LogType, NewLogEntry, ServerRepository,
};

/// Channel service errors
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Channel operations.
pub struct ChannelService<C, S>
where
    C: ChannelRepository,
    S: ServerRepository,
{
    channels: Arc<C>,
    servers: Arc<S>,
}

impl<C, S> ChannelService<C, S>
where
    C: ChannelRepository,
    S: ServerRepository,
{
    pub fn new(channels: Arc<C>, servers: Arc<S>) -> Self {
        Self { channels, servers }
    }

    /// All channels of a server, oldest first.
    pub async fn get_channels(&self, server_id: &str) -> Result<Vec<Channel>, ChannelError> {
        self.channels
            .find_by_server(server_id)
            .await
            .map_err(|e| ChannelError::Internal(e.to_string()))
    }

    /// Create a text channel and record it in the server's audit log.
    ///
    /// The log write is best-effort: channels are not required to belong to
    /// an existing server document, so a failed append only warns.
    pub async fn create_channel(
        &self,
        server_id: &str,
        name: &str,
        actor_id: &str,
    ) -> Result<Channel, ChannelError> {
        let channel = self
            .channels
            .create(server_id, name)
            .await
            .map_err(|e| ChannelError::Internal(e.to_string()))?;

        let log = NewLogEntry {
            log_type: LogType::Channel,
            action: LogAction::Created,
            user_id: actor_id.to_string(),
            target_id: Some(channel.id.clone()),
            metadata: Some(json!({ "name": channel.name.clone() })),
        };
        if let Err(e) = self.servers.append_log(server_id, log).await {
            tracing::warn!(server_id, error = %e, "channel created but audit log append failed");
        }

        Ok(channel)
    }
}
