//! Message Service
//!
//! Handles message CRUD with author checks and audit logging.

use std::sync::Arc;

use serde_json::json;

use crate::domain::{
    LogAction, LogType, Message, MessageRepository, NewLogEntry, NewMessage, ServerRepository,
};

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Message not found")]
    NotFound,

    #[error("Unauthorized: you can only delete your own messages")]
    NotAuthor,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Message operations.
pub struct MessageService<M, S>
where
    M: MessageRepository,
    S: ServerRepository,
{
    messages: Arc<M>,
    servers: Arc<S>,
}

impl<M, S> MessageService<M, S>
where
    M: MessageRepository,
    S: ServerRepository,
{
    pub fn new(messages: Arc<M>, servers: Arc<S>) -> Self {
        Self { messages, servers }
    }

    /// All messages of a channel, oldest first.
    pub async fn get_messages(&self, channel_id: &str) -> Result<Vec<Message>, MessageError> {
        self.messages
            .find_by_channel(channel_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    /// Create a message and record it in the server's audit log.
    ///
    /// `server_id` exists only for the audit trail; messages themselves hang
    /// off their channel. If the log append fails the message stays created.
    pub async fn create_message(
        &self,
        channel_id: &str,
        server_id: &str,
        message: NewMessage,
    ) -> Result<Message, MessageError> {
        let message = self
            .messages
            .create(channel_id, message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        self.servers
            .append_log(
                server_id,
                NewLogEntry {
                    log_type: LogType::Message,
                    action: LogAction::Created,
                    user_id: message.author_id.clone(),
                    target_id: Some(message.id.clone()),
                    metadata: Some(json!({ "channelId": channel_id })),
                },
            )
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        Ok(message)
    }

    /// Delete a message. Only the author may delete it; a mismatch leaves the
    /// message intact.
    pub async fn delete_message(
        &self,
        channel_id: &str,
        message_id: &str,
        author_id: &str,
        server_id: &str,
    ) -> Result<(), MessageError> {
        let message = self
            .messages
            .find_by_id(channel_id, message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::NotFound)?;

        if message.author_id != author_id {
            return Err(MessageError::NotAuthor);
        }

        self.messages
            .delete(channel_id, message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        self.servers
            .append_log(
                server_id,
                NewLogEntry {
                    log_type: LogType::Message,
                    action: LogAction::Deleted,
                    user_id: author_id.to_string(),
                    target_id: Some(message_id.to_string()),
                    metadata: Some(json!({ "channelId": channel_id })),
                },
            )
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        Ok(())
    }
}
