//! Server Repository Implementation
//!
//! Document store implementation of the ServerRepository trait. Membership
//! and the audit log live on the server document itself; both are written
//! back whole, so concurrent writers race (last write wins). The store
//! contract has no transactions.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{LogEntry, NewLogEntry, NewServer, Server, ServerOrder, ServerRepository};
use crate::infrastructure::store::{
    server_timestamp, Direction, DocumentStore, Filter, OrderBy,
};
use crate::shared::error::AppError;

use super::{decode, encode};

const SERVERS: &str = "servers";

/// Document store server repository.
pub struct DocServerRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocServerRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn member_filter(user_id: &str) -> Filter {
        Filter::array_contains("memberIds", user_id)
    }
}

#[async_trait]
impl ServerRepository for DocServerRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Server>, AppError> {
        match self.store.get(SERVERS, id).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    async fn find_by_member(&self, user_id: &str) -> Result<Vec<Server>, AppError> {
        let docs = self
            .store
            .query(SERVERS, Some(Self::member_filter(user_id)), None)
            .await?;

        docs.into_iter().map(decode).collect()
    }

    async fn find_by_member_ordered(
        &self,
        user_id: &str,
        order: ServerOrder,
        descending: bool,
    ) -> Result<Vec<Server>, AppError> {
        let direction = if descending {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        let order = OrderBy {
            field: order.field().to_string(),
            direction,
        };

        let docs = self
            .store
            .query(SERVERS, Some(Self::member_filter(user_id)), Some(order))
            .await?;

        docs.into_iter().map(decode).collect()
    }

    async fn create(&self, server: NewServer) -> Result<Server, AppError> {
        let id = self.store.create_id();
        let server = Server {
            id: id.clone(),
            name: server.name,
            owner_id: server.owner_id,
            member_ids: server.member_ids,
            image_url: server.image_url,
            created_at: None,
            logs: Vec::new(),
        };

        let mut doc = encode(&server)?;
        doc["createdAt"] = server_timestamp();
        self.store.set(SERVERS, &id, doc).await?;

        let saved = self
            .store
            .get(SERVERS, &id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("server {id} missing after write")))?;
        decode(saved)
    }

    async fn update_members(&self, id: &str, member_ids: &[String]) -> Result<(), AppError> {
        self.store
            .update(SERVERS, id, json!({ "memberIds": member_ids }))
            .await?;
        Ok(())
    }

    async fn append_log(&self, id: &str, entry: NewLogEntry) -> Result<(), AppError> {
        let server = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Server not found".into()))?;

        let log = LogEntry {
            id: self.store.create_id(),
            log_type: entry.log_type,
            action: entry.action,
            user_id: entry.user_id,
            target_id: entry.target_id,
            metadata: entry.metadata,
            timestamp: None,
        };

        let mut entries = encode(&server.logs)?;
        let mut appended = encode(&log)?;
        appended["timestamp"] = server_timestamp();
        if let Value::Array(items) = &mut entries {
            items.push(appended);
        }

        self.store
            .update(SERVERS, id, json!({ "logs": entries }))
            .await?;
        Ok(())
    }
}
