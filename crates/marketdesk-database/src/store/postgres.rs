//! PostgreSQL Entity API backend.
//!
//! Every entity lives in the single `entity_records` table; the full record
//! is kept in the `fields` JSONB column and equality filters are evaluated
//! with JSONB containment (`fields @> $filter`).

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;
use uuid::Uuid;

use marketdesk_core::error::{AppError, ErrorKind};
use marketdesk_core::result::AppResult;
use marketdesk_core::traits::EntityApi;
use marketdesk_core::types::{Query, Record, SortDirection, Where};

use super::stamp;

/// Entity API over PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, format!("{context}: {e}"), e)
}

/// Row id for a stamped record: its `id` when that is a UUID, else a fresh one.
fn row_id(record: &Record) -> Uuid {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// A pagination bound as a Postgres `BIGINT`.
fn sql_bound(name: &str, value: u64) -> AppResult<i64> {
    i64::try_from(value).map_err(|_| AppError::validation(format!("{name} is out of range")))
}

/// `ORDER BY` for a query. The sort field, when present, is bound as `$5`.
fn order_clause(query: &Query) -> &'static str {
    match query.order.as_ref().map(|o| o.direction) {
        Some(SortDirection::Asc) => "ORDER BY fields -> $5 ASC, created_at ASC",
        Some(SortDirection::Desc) => "ORDER BY fields -> $5 DESC, created_at DESC",
        None => "ORDER BY created_at ASC",
    }
}

#[async_trait]
impl EntityApi for PgEntityStore {
    async fn create(&self, entity: &str, fields: Record) -> AppResult<Record> {
        let record = stamp(fields);
        let Json(stored) = sqlx::query_scalar::<_, Json<Record>>(
            "INSERT INTO entity_records (id, entity, fields) VALUES ($1, $2, $3) RETURNING fields",
        )
        .bind(row_id(&record))
        .bind(entity)
        .bind(Json(&record))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to create record"))?;

        debug!(entity, "Created record");
        Ok(stored)
    }

    async fn find_all(&self, entity: &str, query: &Query) -> AppResult<Vec<Record>> {
        let sql = format!(
            "SELECT fields FROM entity_records WHERE entity = $1 AND fields @> $2 {} \
             LIMIT $3 OFFSET $4",
            order_clause(query)
        );

        let limit = query.limit.map(|l| sql_bound("limit", l)).transpose()?;
        let offset = sql_bound("offset", query.offset.unwrap_or(0))?;

        let mut statement = sqlx::query_scalar::<_, Json<Record>>(&sql)
            .bind(entity)
            .bind(Json(query.filter.as_map()))
            .bind(limit)
            .bind(offset);
        if let Some(order) = &query.order {
            statement = statement.bind(order.field.clone());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to find records"))?;

        Ok(rows.into_iter().map(|Json(r)| r).collect())
    }

    async fn find_one(&self, entity: &str, filter: &Where) -> AppResult<Option<Record>> {
        let row = sqlx::query_scalar::<_, Json<Record>>(
            "SELECT fields FROM entity_records WHERE entity = $1 AND fields @> $2 \
             ORDER BY created_at ASC LIMIT 1",
        )
        .bind(entity)
        .bind(Json(filter.as_map()))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("Failed to find record"))?;

        Ok(row.map(|Json(r)| r))
    }

    async fn update(&self, entity: &str, fields: Record, filter: &Where) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE entity_records SET fields = fields || $3 WHERE entity = $1 AND fields @> $2",
        )
        .bind(entity)
        .bind(Json(filter.as_map()))
        .bind(Json(&fields))
        .execute(&self.pool)
        .await
        .map_err(db_err("Failed to update records"))?;

        debug!(entity, affected = result.rows_affected(), "Updated records");
        Ok(result.rows_affected())
    }

    async fn destroy(&self, entity: &str, filter: &Where) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM entity_records WHERE entity = $1 AND fields @> $2")
                .bind(entity)
                .bind(Json(filter.as_map()))
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to destroy records"))?;

        debug!(entity, removed = result.rows_affected(), "Destroyed records");
        Ok(result.rows_affected())
    }

    async fn count(&self, entity: &str, filter: &Where) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM entity_records WHERE entity = $1 AND fields @> $2",
        )
        .bind(entity)
        .bind(Json(filter.as_map()))
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("Failed to count records"))?;

        Ok(count as u64)
    }

    async fn list(&self, entity: &str) -> AppResult<Vec<Record>> {
        let rows = sqlx::query_scalar::<_, Json<Record>>(
            "SELECT fields FROM entity_records WHERE entity = $1 ORDER BY created_at ASC",
        )
        .bind(entity)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("Failed to list records"))?;

        Ok(rows.into_iter().map(|Json(r)| r).collect())
    }

    async fn create_if_absent(
        &self,
        entity: &str,
        filter: &Where,
        fields: Record,
    ) -> AppResult<Option<Record>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        // Serializes concurrent inserts for the same entity and filter.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1 || ':' || ($2::jsonb)::text))")
            .bind(entity)
            .bind(Json(filter.as_map()))
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to acquire insert lock"))?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM entity_records WHERE entity = $1 AND fields @> $2)",
        )
        .bind(entity)
        .bind(Json(filter.as_map()))
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err("Failed to check for existing record"))?;

        if exists {
            tx.rollback()
                .await
                .map_err(db_err("Failed to roll back transaction"))?;
            return Ok(None);
        }

        let record = stamp(fields);
        let Json(stored) = sqlx::query_scalar::<_, Json<Record>>(
            "INSERT INTO entity_records (id, entity, fields) VALUES ($1, $2, $3) RETURNING fields",
        )
        .bind(row_id(&record))
        .bind(entity)
        .bind(Json(&record))
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err("Failed to create record"))?;

        tx.commit()
            .await
            .map_err(db_err("Failed to commit transaction"))?;
        Ok(Some(stored))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(db_err("Health check failed"))
    }
}
