//! User entity and repository trait.
//!
//! Maps to documents in the `users` collection, keyed by the identity
//! provider's user id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A user profile synced from the identity provider.
///
/// Document shape:
/// - id: string (provider uid, stable once created)
/// - username: string
/// - profilePhotoUrl: string | null
/// - createdAt: timestamp (store-assigned)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identity provider user id (document id)
    pub id: String,

    /// Display name
    pub username: String,

    /// Profile photo URL, if any
    pub profile_photo_url: Option<String>,

    /// Store-assigned creation timestamp; upserts never touch it
    pub created_at: Option<DateTime<Utc>>,
}

/// Repository trait for User data access operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Point-read each id; missing users are silently omitted.
    async fn find_many(&self, ids: &[String]) -> Result<Vec<User>, AppError>;

    /// Create a user with a store-assigned `createdAt`.
    async fn create(
        &self,
        id: &str,
        username: &str,
        profile_photo_url: Option<String>,
    ) -> Result<User, AppError>;

    /// Overwrite profile fields of an existing user, leaving `createdAt` as is.
    async fn update_profile(
        &self,
        id: &str,
        username: &str,
        profile_photo_url: Option<String>,
    ) -> Result<User, AppError>;
}
