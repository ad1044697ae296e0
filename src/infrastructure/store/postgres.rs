//! PostgreSQL document store.
//!
//! Documents live in a single `documents` table keyed by (collection, id)
//! with a JSONB body. Equality and array-membership filters compile to JSONB
//! containment so the GIN index applies; ordering reads a top-level field as
//! text, which is chronological for the fixed-width timestamps the adapter
//! stamps.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;

use super::{
    resolve_server_timestamps, Direction, DocumentStore, Filter, OrderBy, StoreError,
};

/// Document store over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new PgDocumentStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Positional bind values collected while building a query.
enum Bind {
    Json(Value),
    Text(String),
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let row: Option<(Value,)> = sqlx::query_as(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(data,)| data))
    }

    async fn set(&self, collection: &str, id: &str, mut data: Value) -> Result<(), StoreError> {
        resolve_server_timestamps(&mut data, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, mut patch: Value) -> Result<(), StoreError> {
        resolve_server_timestamps(&mut patch, Utc::now());

        // `||` merges top-level fields, matching the memory store.
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(patch)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<Filter>,
        order: Option<OrderBy>,
    ) -> Result<Vec<Value>, StoreError> {
        let mut sql = String::from("SELECT data FROM documents WHERE collection = $1");
        let mut binds: Vec<Bind> = Vec::new();
        let mut next_param = 2;

        match filter {
            Some(Filter::Eq { field, value }) => {
                sql.push_str(&format!(" AND data @> ${next_param}"));
                let mut probe = serde_json::Map::new();
                probe.insert(field, value);
                binds.push(Bind::Json(Value::Object(probe)));
                next_param += 1;
            }
            Some(Filter::ArrayContains { field, value }) => {
                sql.push_str(&format!(
                    " AND data -> ${} @> ${}",
                    next_param,
                    next_param + 1
                ));
                binds.push(Bind::Text(field));
                binds.push(Bind::Json(Value::Array(vec![value])));
                next_param += 2;
            }
            None => {}
        }

        match order {
            Some(OrderBy { field, direction }) => {
                let dir = match direction {
                    Direction::Ascending => "ASC",
                    Direction::Descending => "DESC",
                };
                // Tie-break on id so result order is deterministic.
                sql.push_str(&format!(" ORDER BY data ->> ${next_param} {dir}, id {dir}"));
                binds.push(Bind::Text(field));
            }
            None => sql.push_str(" ORDER BY id"),
        }

        let mut query = sqlx::query_as::<_, (Value,)>(&sql).bind(collection);
        for bind in binds {
            query = match bind {
                Bind::Json(value) => query.bind(value),
                Bind::Text(text) => query.bind(text),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(data,)| data).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
