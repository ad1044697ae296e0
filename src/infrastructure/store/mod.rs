//! Document Store Adapter
//!
//! Schemaless document storage addressed by collection path and document id.
//! Collection paths may be nested (`channels/<id>/messages`), so callers can
//! model subcollections without the store knowing about entities.
//!
//! The adapter is injected as `Arc<dyn DocumentStore>`; the process creates
//! one handle at startup and reuses it for every request. Two implementations
//! exist: [`PgDocumentStore`] (PostgreSQL JSONB) for production and
//! [`MemoryDocumentStore`] for tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Sentinel value replaced with the store's clock when a document is written.
///
/// Writers place this in any field (nested fields and array elements
/// included) that should carry a store-assigned timestamp; create flows then
/// re-read the document to observe the resolved value.
pub const SERVER_TIMESTAMP: &str = "__serverTimestamp__";

/// Marker value for fields the store stamps at write time.
pub fn server_timestamp() -> Value {
    Value::String(SERVER_TIMESTAMP.to_string())
}

/// Filters supported by [`DocumentStore::query`].
#[derive(Debug, Clone)]
pub enum Filter {
    /// Field equals the given value.
    Eq { field: String, value: Value },
    /// Array field contains the given value.
    ArrayContains { field: String, value: Value },
}

impl Filter {
    /// Equality filter on a top-level field.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Membership filter on a top-level array field.
    pub fn array_contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContains {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Sort direction for [`OrderBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering on a top-level document field. Ties sort by document id.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// Document store failures.
///
/// The store never retries; failures propagate to the caller as-is and
/// surface as 500s at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("document {collection}/{id} does not exist")]
    Missing { collection: String, id: String },

    #[error("document decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Contract for the document database.
///
/// All documents are JSON objects. `set` overwrites, `update` merges
/// top-level fields into an existing document, `delete` is idempotent.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Write a full document, creating or replacing it.
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError>;

    /// Merge top-level fields into an existing document.
    ///
    /// Fails with [`StoreError::Missing`] if the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;

    /// Delete a document. Absent documents are a no-op.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// List documents in a collection, optionally filtered and ordered.
    async fn query(
        &self,
        collection: &str,
        filter: Option<Filter>,
        order: Option<OrderBy>,
    ) -> Result<Vec<Value>, StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Generate a fresh document id.
    fn create_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Create the PostgreSQL connection pool backing the production store.
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run document store migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Fixed-width RFC 3339 rendering (microseconds, UTC) so that text ordering
/// of stored timestamps matches chronological ordering.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Replace every [`SERVER_TIMESTAMP`] sentinel in `value` (recursively) with
/// the given instant.
pub(crate) fn resolve_server_timestamps(value: &mut Value, now: DateTime<Utc>) {
    match value {
        Value::String(s) if s == SERVER_TIMESTAMP => {
            *value = Value::String(format_timestamp(now));
        }
        Value::Array(items) => {
            for item in items {
                resolve_server_timestamps(item, now);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                resolve_server_timestamps(item, now);
            }
        }
        _ => {}
    }
}
