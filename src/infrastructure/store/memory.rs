//! In-memory document store.
//!
//! Backs the test suite and local development. Semantics mirror
//! [`PgDocumentStore`](super::PgDocumentStore): sentinel timestamps are
//! resolved at write time, `update` merges top-level fields, queries order by
//! a top-level field with the document id as tie-break.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;

use super::{
    resolve_server_timestamps, Direction, DocumentStore, Filter, OrderBy, StoreError,
};

/// DashMap-backed document store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, DashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).map(|doc| doc.value().clone())))
    }

    async fn set(&self, collection: &str, id: &str, mut data: Value) -> Result<(), StoreError> {
        resolve_server_timestamps(&mut data, Utc::now());
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, mut patch: Value) -> Result<(), StoreError> {
        resolve_server_timestamps(&mut patch, Utc::now());

        let docs = self
            .collections
            .get(collection)
            .ok_or_else(|| missing(collection, id))?;
        let mut doc = docs.get_mut(id).ok_or_else(|| missing(collection, id))?;

        if let (Value::Object(existing), Value::Object(fields)) = (&mut *doc, patch) {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if let Some(docs) = self.collections.get(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<Filter>,
        order: Option<OrderBy>,
    ) -> Result<Vec<Value>, StoreError> {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<(String, Value)> = docs
            .iter()
            .filter(|entry| filter.as_ref().map_or(true, |f| matches(entry.value(), f)))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        if let Some(order) = &order {
            matched.sort_by(|(a_id, a), (b_id, b)| {
                let ordering = compare_fields(a.get(&order.field), b.get(&order.field))
                    .then_with(|| a_id.cmp(b_id));
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        } else {
            // Deterministic iteration for an unordered map.
            matched.sort_by(|(a_id, _), (b_id, _)| a_id.cmp(b_id));
        }

        Ok(matched.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn missing(collection: &str, id: &str) -> StoreError {
    StoreError::Missing {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

fn matches(doc: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { field, value } => doc.get(field) == Some(value),
        Filter::ArrayContains { field, value } => doc
            .get(field)
            .and_then(Value::as_array)
            .is_some_and(|items| items.contains(value)),
    }
}

/// Field comparison for ordering. Stored timestamps are fixed-width RFC 3339
/// strings, so plain text comparison is chronological.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
