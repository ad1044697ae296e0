//! Reaction Repository Implementation
//!
//! Document store implementation of the ReactionRepository trait. Reaction
//! documents are keyed by the `<userId>_<emoji>` composite, which makes
//! re-adding the same reaction an overwrite instead of a duplicate.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Reaction, ReactionRepository};
use crate::infrastructure::store::{server_timestamp, DocumentStore};
use crate::shared::error::AppError;

use super::{decode, encode};

fn collection(message_id: &str) -> String {
    format!("reactions/{message_id}/items")
}

/// Document store reaction repository.
pub struct DocReactionRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocReactionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReactionRepository for DocReactionRepository {
    async fn upsert(
        &self,
        message_id: &str,
        user_id: &str,
        emoji: &str,
    ) -> Result<(), AppError> {
        let reaction = Reaction {
            message_id: message_id.to_string(),
            user_id: user_id.to_string(),
            emoji: emoji.to_string(),
            created_at: None,
        };

        let mut doc = encode(&reaction)?;
        doc["createdAt"] = server_timestamp();
        self.store
            .set(
                &collection(message_id),
                &Reaction::document_id(user_id, emoji),
                doc,
            )
            .await?;
        Ok(())
    }

    async fn remove(
        &self,
        message_id: &str,
        user_id: &str,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.store
            .delete(
                &collection(message_id),
                &Reaction::document_id(user_id, emoji),
            )
            .await?;
        Ok(())
    }

    async fn find_by_message(&self, message_id: &str) -> Result<Vec<Reaction>, AppError> {
        let docs = self.store.query(&collection(message_id), None, None).await?;
        docs.into_iter().map(decode).collect()
    }
}
