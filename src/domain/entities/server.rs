//! Server entity, audit log types and repository trait.
//!
//! A Server here is a messaging community/workspace (not the HTTP process).
//! Maps to documents in the `servers` collection; the audit log is an
//! append-only array embedded in the server document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::error::AppError;

/// A messaging community.
///
/// Document shape:
/// - id: string
/// - name: string
/// - ownerId: string (always present in memberIds)
/// - memberIds: string[] (unique)
/// - imageUrl: string | null
/// - createdAt: timestamp (store-assigned)
/// - logs: LogEntry[] (append-only, absent until the first entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,

    /// Server name (trimmed, non-empty)
    pub name: String,

    /// User id of the server owner
    pub owner_id: String,

    /// Member user ids; unique, owner always included
    pub member_ids: Vec<String>,

    /// URL to the server image
    pub image_url: Option<String>,

    /// Store-assigned creation timestamp
    pub created_at: Option<DateTime<Utc>>,

    /// Append-only audit log; entries are never mutated or removed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<LogEntry>,
}

impl Server {
    /// Check if a user is a member of this server.
    pub fn is_member(&self, user_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == user_id)
    }
}

/// Reduced server shape exposed by list endpoints.
///
/// `memberIds` and `logs` are intentionally absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicServer {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<Server> for PublicServer {
    fn from(server: Server) -> Self {
        Self {
            id: server.id,
            owner_id: server.owner_id,
            name: server.name,
            image_url: server.image_url,
        }
    }
}

/// Parameters for creating a server. `member_ids` must already be deduplicated
/// with the owner first; the service layer enforces that invariant.
#[derive(Debug, Clone)]
pub struct NewServer {
    pub name: String,
    pub owner_id: String,
    pub image_url: Option<String>,
    pub member_ids: Vec<String>,
}

/// Category of an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Server,
    Channel,
    Message,
    Invitation,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Channel => "channel",
            Self::Message => "message",
            Self::Invitation => "invitation",
        }
    }
}

/// Action recorded by an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogAction {
    Created,
    Deleted,
    Updated,
    Joined,
    Invited,
}

/// Immutable audit record embedded in a Server document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Generated entry id
    pub id: String,

    #[serde(rename = "type")]
    pub log_type: LogType,

    pub action: LogAction,

    /// User who performed the action
    pub user_id: String,

    /// Entity the action targeted, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,

    /// Free-form context (channel id, server name, invite hash, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Store-assigned timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

/// A log entry about to be appended; id and timestamp are assigned on write.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub log_type: LogType,
    pub action: LogAction,
    pub user_id: String,
    pub target_id: Option<String>,
    pub metadata: Option<Value>,
}

/// Fields server lists can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerOrder {
    CreatedAt,
    Name,
}

impl ServerOrder {
    /// Parse a query-string value, case-insensitively. Unknown values yield
    /// `None` and callers fall back to an unordered listing.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "createdat" => Some(Self::CreatedAt),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    /// Document field backing this ordering.
    pub fn field(&self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Name => "name",
        }
    }
}

/// Repository trait for Server data access operations.
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Find a server by id, logs included.
    async fn find_by_id(&self, id: &str) -> Result<Option<Server>, AppError>;

    /// Find all servers a user is a member of.
    async fn find_by_member(&self, user_id: &str) -> Result<Vec<Server>, AppError>;

    /// Find all servers a user is a member of, ordered by the given field.
    async fn find_by_member_ordered(
        &self,
        user_id: &str,
        order: ServerOrder,
        descending: bool,
    ) -> Result<Vec<Server>, AppError>;

    /// Create a new server with a store-assigned id and timestamp.
    async fn create(&self, server: NewServer) -> Result<Server, AppError>;

    /// Replace the member list. Last write wins under concurrency.
    async fn update_members(&self, id: &str, member_ids: &[String]) -> Result<(), AppError>;

    /// Append an audit log entry; fails with NotFound if the server is absent.
    async fn append_log(&self, id: &str, entry: NewLogEntry) -> Result<(), AppError>;
}
