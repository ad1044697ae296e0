//! Message Reaction entity and repository trait.
//!
//! Reactions live in per-message subcollections
//! (`reactions/<messageId>/items`), keyed by the `<userId>_<emoji>` composite
//! so each user can react at most once per emoji per message.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A reaction on a message.
///
/// Identity is the (userId, emoji) pair; re-adding the same pair overwrites
/// the existing record instead of duplicating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub message_id: String,

    pub user_id: String,

    /// Unicode emoji (trimmed)
    pub emoji: String,

    /// Store-assigned timestamp of the (latest) add
    pub created_at: Option<DateTime<Utc>>,
}

impl Reaction {
    /// Composite document id for a (user, emoji) pair.
    pub fn document_id(user_id: &str, emoji: &str) -> String {
        format!("{user_id}_{emoji}")
    }
}

/// Per-emoji aggregation for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmojiReactions {
    /// Number of users who reacted with this emoji
    pub count: usize,

    /// User ids who reacted
    pub users: Vec<String>,
}

/// Repository trait for Reaction data access operations.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Add or overwrite the reaction for a (user, emoji) pair.
    async fn upsert(&self, message_id: &str, user_id: &str, emoji: &str)
        -> Result<(), AppError>;

    /// Remove the reaction for a (user, emoji) pair; absent is a no-op.
    async fn remove(&self, message_id: &str, user_id: &str, emoji: &str)
        -> Result<(), AppError>;

    /// All reaction records of a message.
    async fn find_by_message(&self, message_id: &str) -> Result<Vec<Reaction>, AppError>;
}
