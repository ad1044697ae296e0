//! Message Repository Implementation
//!
//! Document store implementation of the MessageRepository trait. Messages are
//! stored in per-channel subcollections.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Message, MessageRepository, NewMessage};
use crate::infrastructure::store::{server_timestamp, DocumentStore, OrderBy};
use crate::shared::error::AppError;

use super::{decode, encode};

fn collection(channel_id: &str) -> String {
    format!("channels/{channel_id}/messages")
}

/// Document store message repository.
pub struct DocMessageRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocMessageRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for DocMessageRepository {
    async fn find_by_channel(&self, channel_id: &str) -> Result<Vec<Message>, AppError> {
        let docs = self
            .store
            .query(&collection(channel_id), None, Some(OrderBy::asc("createdAt")))
            .await?;

        docs.into_iter().map(decode).collect()
    }

    async fn find_by_id(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Option<Message>, AppError> {
        match self.store.get(&collection(channel_id), message_id).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, channel_id: &str, message: NewMessage) -> Result<Message, AppError> {
        let id = self.store.create_id();
        let message = Message {
            id: id.clone(),
            channel_id: channel_id.to_string(),
            author_id: message.author_id,
            author_name: message.author_name,
            author_avatar_url: message.author_avatar_url,
            content: message.content,
            created_at: None,
        };

        let mut doc = encode(&message)?;
        doc["createdAt"] = server_timestamp();
        self.store.set(&collection(channel_id), &id, doc).await?;

        let saved = self
            .store
            .get(&collection(channel_id), &id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("message {id} missing after write")))?;
        decode(saved)
    }

    async fn delete(&self, channel_id: &str, message_id: &str) -> Result<(), AppError> {
        self.store.delete(&collection(channel_id), message_id).await?;
        Ok(())
    }
}
