//! User Service
//!
//! Handles user profile management. Users are created by the identity
//! provider; this backend only mirrors their profile documents.

use std::sync::Arc;

use crate::domain::{User, UserRepository};

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// User profile operations.
pub struct UserService<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Create or update a user profile. Idempotent: calling twice with the
    /// same id overwrites `username`/`profilePhotoUrl` and leaves `createdAt`
    /// untouched.
    pub async fn upsert_user(
        &self,
        user_id: &str,
        username: &str,
        profile_photo_url: Option<String>,
    ) -> Result<User, UserError> {
        let existing = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        let user = if existing.is_some() {
            self.users
                .update_profile(user_id, username, profile_photo_url)
                .await
        } else {
            self.users.create(user_id, username, profile_photo_url).await
        }
        .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(user)
    }

    /// Get a user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<User, UserError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }

    /// Get multiple users by id; missing users are silently omitted.
    pub async fn get_users(&self, user_ids: &[String]) -> Result<Vec<User>, UserError> {
        self.users
            .find_many(user_ids)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }
}
