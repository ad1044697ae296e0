//! Channel Repository Implementation
//!
//! Document store implementation of the ChannelRepository trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Channel, ChannelKind, ChannelRepository};
use crate::infrastructure::store::{server_timestamp, DocumentStore, Filter, OrderBy};
use crate::shared::error::AppError;

use super::{decode, encode};

const CHANNELS: &str = "channels";

/// Document store channel repository.
pub struct DocChannelRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocChannelRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChannelRepository for DocChannelRepository {
    async fn find_by_server(&self, server_id: &str) -> Result<Vec<Channel>, AppError> {
        let docs = self
            .store
            .query(
                CHANNELS,
                Some(Filter::eq("serverId", server_id)),
                Some(OrderBy::asc("createdAt")),
            )
            .await?;

        docs.into_iter().map(decode).collect()
    }

    async fn create(&self, server_id: &str, name: &str) -> Result<Channel, AppError> {
        let id = self.store.create_id();
        let channel = Channel {
            id: id.clone(),
            server_id: server_id.to_string(),
            name: name.to_string(),
            kind: ChannelKind::Text,
            created_at: None,
        };

        let mut doc = encode(&channel)?;
        doc["createdAt"] = server_timestamp();
        self.store.set(CHANNELS, &id, doc).await?;

        let saved = self
            .store
            .get(CHANNELS, &id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("channel {id} missing after write")))?;
        decode(saved)
    }
}
