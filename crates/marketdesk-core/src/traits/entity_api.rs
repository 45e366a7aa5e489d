//! The generic Entity API: CRUD over named entities.
//!
//! Backends own every record; services only ever talk to an
//! `Arc<dyn EntityApi>`. Records travel as JSON objects so that the trait
//! stays object safe; [`EntityTable`] restores static typing per entity.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::query::{Query, Record, Where};

/// CRUD provider keyed by entity name.
#[async_trait]
pub trait EntityApi: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a record. The backend fills `id` and `created_at` when absent.
    async fn create(&self, entity: &str, fields: Record) -> AppResult<Record>;

    /// Return every record matching the query.
    async fn find_all(&self, entity: &str, query: &Query) -> AppResult<Vec<Record>>;

    /// Return the first record matching the filter.
    async fn find_one(&self, entity: &str, filter: &Where) -> AppResult<Option<Record>>;

    /// Merge `fields` into every matching record. Returns the affected count.
    async fn update(&self, entity: &str, fields: Record, filter: &Where) -> AppResult<u64>;

    /// Delete every matching record. Returns the deleted count.
    async fn destroy(&self, entity: &str, filter: &Where) -> AppResult<u64>;

    /// Count matching records.
    async fn count(&self, entity: &str, filter: &Where) -> AppResult<u64>;

    /// Return every record of the entity.
    async fn list(&self, entity: &str) -> AppResult<Vec<Record>>;

    /// Insert `fields` unless a record matching `filter` exists.
    ///
    /// The check and the insert happen atomically with respect to other
    /// `create_if_absent` calls on the same entity. Returns `None` when a
    /// matching record already existed.
    async fn create_if_absent(
        &self,
        entity: &str,
        filter: &Where,
        fields: Record,
    ) -> AppResult<Option<Record>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// A typed model stored through the Entity API.
pub trait EntityModel: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The entity name the model is stored under.
    const ENTITY: &'static str;
}

/// Typed view of one entity over an [`EntityApi`].
#[derive(Debug)]
pub struct EntityTable<T> {
    api: Arc<dyn EntityApi>,
    _model: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityTable<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            _model: PhantomData,
        }
    }
}

impl<T: EntityModel> EntityTable<T> {
    /// Create a typed table over the given API.
    pub fn new(api: Arc<dyn EntityApi>) -> Self {
        Self {
            api,
            _model: PhantomData,
        }
    }

    /// The underlying API.
    pub fn api(&self) -> &Arc<dyn EntityApi> {
        &self.api
    }

    /// Insert raw fields and decode the stored record.
    pub async fn create(&self, fields: Record) -> AppResult<T> {
        let record = self.api.create(T::ENTITY, fields).await?;
        decode(record)
    }

    /// Find and decode all matching records.
    pub async fn find_all(&self, query: &Query) -> AppResult<Vec<T>> {
        self.api
            .find_all(T::ENTITY, query)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Find and decode the first matching record.
    pub async fn find_one(&self, filter: &Where) -> AppResult<Option<T>> {
        self.api
            .find_one(T::ENTITY, filter)
            .await?
            .map(decode)
            .transpose()
    }

    /// Update matching records.
    pub async fn update(&self, fields: Record, filter: &Where) -> AppResult<u64> {
        self.api.update(T::ENTITY, fields, filter).await
    }

    /// Delete matching records.
    pub async fn destroy(&self, filter: &Where) -> AppResult<u64> {
        self.api.destroy(T::ENTITY, filter).await
    }

    /// Count matching records.
    pub async fn count(&self, filter: &Where) -> AppResult<u64> {
        self.api.count(T::ENTITY, filter).await
    }

    /// Insert unless a matching record exists.
    pub async fn create_if_absent(&self, filter: &Where, fields: Record) -> AppResult<Option<T>> {
        self.api
            .create_if_absent(T::ENTITY, filter, fields)
            .await?
            .map(decode)
            .transpose()
    }
}

/// Serialize a value into a record. Fails unless it serializes to an object.
pub fn to_record<S: Serialize>(value: &S) -> AppResult<Record> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::validation(format!(
            "Expected an object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn decode<T: DeserializeOwned>(record: Record) -> AppResult<T> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
