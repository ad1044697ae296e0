//! Repository Implementations
//!
//! Document-store implementations of the domain repository traits.
//!
//! Each repository handles document <-> entity mapping for one entity type.
//! Entities serialize to the exact stored document shape, so mapping is
//! serde plus timestamp-sentinel placement. All repositories share one
//! injected `Arc<dyn DocumentStore>` handle.
//!
//! ## Available Repositories
//!
//! - **DocUserRepository** - user profiles (`users`)
//! - **DocServerRepository** - servers, membership and audit logs (`servers`)
//! - **DocChannelRepository** - channels (`channels`)
//! - **DocMessageRepository** - messages (`channels/<id>/messages`)
//! - **DocReactionRepository** - reactions (`reactions/<id>/items`)

pub mod user_repository;
pub mod server_repository;
pub mod channel_repository;
pub mod message_repository;
pub mod reaction_repository;

pub use user_repository::DocUserRepository;
pub use server_repository::DocServerRepository;
pub use channel_repository::DocChannelRepository;
pub use message_repository::DocMessageRepository;
pub use reaction_repository::DocReactionRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::infrastructure::store::StoreError;
use crate::shared::error::AppError;

/// Decode a stored document into an entity.
pub(crate) fn decode<T: DeserializeOwned>(doc: Value) -> Result<T, AppError> {
    serde_json::from_value(doc).map_err(|e| AppError::Store(StoreError::Decode(e)))
}

/// Encode an entity into its document shape.
pub(crate) fn encode<T: Serialize>(entity: &T) -> Result<Value, AppError> {
    serde_json::to_value(entity).map_err(|e| AppError::Store(StoreError::Decode(e)))
}
