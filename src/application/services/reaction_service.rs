//! Reaction Service
//!
//! Handles reaction upserts, removal and per-emoji aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{EmojiReactions, ReactionRepository};

/// Reaction service errors
#[derive(Debug, thiserror::Error)]
pub enum ReactionError {
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reaction operations.
pub struct ReactionService<R>
where
    R: ReactionRepository,
{
    reactions: Arc<R>,
}

impl<R> ReactionService<R>
where
    R: ReactionRepository,
{
    pub fn new(reactions: Arc<R>) -> Self {
        Self { reactions }
    }

    /// Add a reaction. Keyed by the (user, emoji) pair, so re-adding the same
    /// reaction overwrites instead of duplicating.
    pub async fn add_reaction(
        &self,
        message_id: &str,
        user_id: &str,
        emoji: &str,
    ) -> Result<(), ReactionError> {
        self.reactions
            .upsert(message_id, user_id, emoji)
            .await
            .map_err(|e| ReactionError::Internal(e.to_string()))
    }

    /// Remove a user's reaction; absent reactions are a no-op.
    pub async fn remove_reaction(
        &self,
        message_id: &str,
        user_id: &str,
        emoji: &str,
    ) -> Result<(), ReactionError> {
        self.reactions
            .remove(message_id, user_id, emoji)
            .await
            .map_err(|e| ReactionError::Internal(e.to_string()))
    }

    /// Aggregate all reactions of a message by emoji.
    pub async fn get_reactions(
        &self,
        message_id: &str,
    ) -> Result<BTreeMap<String, EmojiReactions>, ReactionError> {
        let reactions = self
            .reactions
            .find_by_message(message_id)
            .await
            .map_err(|e| ReactionError::Internal(e.to_string()))?;

        let mut summary: BTreeMap<String, EmojiReactions> = BTreeMap::new();
        for reaction in reactions {
            let entry = summary.entry(reaction.emoji).or_default();
            entry.count += 1;
            entry.users.push(reaction.user_id);
        }

        Ok(summary)
    }
}
