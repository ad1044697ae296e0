//! User Repository Implementation
//!
//! Document store implementation of the UserRepository trait. User documents
//! are keyed by the identity provider's uid, so creation is an explicit `set`
//! rather than a generated id.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future;
use serde_json::json;

use crate::domain::{User, UserRepository};
use crate::infrastructure::store::{server_timestamp, DocumentStore};
use crate::shared::error::AppError;

use super::{decode, encode};

const USERS: &str = "users";

/// Document store user repository.
pub struct DocUserRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocUserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Re-read a user after a write to pick up store-assigned fields.
    async fn reread(&self, id: &str) -> Result<User, AppError> {
        let doc = self
            .store
            .get(USERS, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("user {id} missing after write")))?;
        decode(doc)
    }
}

#[async_trait]
impl UserRepository for DocUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        match self.store.get(USERS, id).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // Concurrent point reads; ids without a document are dropped.
        let reads = ids.iter().map(|id| self.store.get(USERS, id));
        let docs = future::try_join_all(reads).await?;

        docs.into_iter().flatten().map(decode).collect()
    }

    async fn create(
        &self,
        id: &str,
        username: &str,
        profile_photo_url: Option<String>,
    ) -> Result<User, AppError> {
        let user = User {
            id: id.to_string(),
            username: username.to_string(),
            profile_photo_url,
            created_at: None,
        };

        let mut doc = encode(&user)?;
        doc["createdAt"] = server_timestamp();
        self.store.set(USERS, id, doc).await?;

        self.reread(id).await
    }

    async fn update_profile(
        &self,
        id: &str,
        username: &str,
        profile_photo_url: Option<String>,
    ) -> Result<User, AppError> {
        self.store
            .update(
                USERS,
                id,
                json!({
                    "username": username,
                    "profilePhotoUrl": profile_photo_url,
                }),
            )
            .await?;

        self.reread(id).await
    }
}
