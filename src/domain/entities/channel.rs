//! Channel entity and repository trait.
//!
//! Maps to documents in the `channels` collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Channel kind. Only text channels exist; the value is stored on every
/// channel document as `"text"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Text,
}

/// A text channel within a server.
///
/// Document shape:
/// - id: string
/// - serverId: string (immutable after creation)
/// - name: string
/// - type: "text"
/// - createdAt: timestamp (store-assigned)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,

    /// Owning server; never changes after creation
    pub server_id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: ChannelKind,

    /// Store-assigned creation timestamp
    pub created_at: Option<DateTime<Utc>>,
}

/// Repository trait for Channel data access operations.
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// All channels of a server, ascending by creation time.
    async fn find_by_server(&self, server_id: &str) -> Result<Vec<Channel>, AppError>;

    /// Create a text channel with a store-assigned id and timestamp.
    async fn create(&self, server_id: &str, name: &str) -> Result<Channel, AppError>;
}
