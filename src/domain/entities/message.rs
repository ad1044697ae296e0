//! Message entity and repository trait.
//!
//! Messages live in per-channel subcollections
//! (`channels/<channelId>/messages`), so all operations are scoped by
//! channel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A text message sent in a channel.
///
/// Author fields are denormalized at send time; later profile changes do not
/// rewrite existing messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,

    pub channel_id: String,

    /// Author user id; only the author may delete the message
    pub author_id: String,

    pub author_name: String,

    pub author_avatar_url: Option<String>,

    pub content: String,

    /// Store-assigned creation timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters for creating a message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub author_id: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub content: String,
}

/// Repository trait for Message data access operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// All messages of a channel, ascending by creation time.
    async fn find_by_channel(&self, channel_id: &str) -> Result<Vec<Message>, AppError>;

    /// Find one message within a channel.
    async fn find_by_id(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Option<Message>, AppError>;

    /// Create a message with a store-assigned id and timestamp.
    async fn create(&self, channel_id: &str, message: NewMessage) -> Result<Message, AppError>;

    /// Delete a message. Authorization happens in the service layer.
    async fn delete(&self, channel_id: &str, message_id: &str) -> Result<(), AppError>;
}
