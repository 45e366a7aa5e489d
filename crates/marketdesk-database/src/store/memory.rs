//! Process-local Entity API backend.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use marketdesk_core::result::AppResult;
use marketdesk_core::traits::EntityApi;
use marketdesk_core::types::{Query, Record, SortDirection, Where};

use super::stamp;

/// In-memory Entity API backed by one `DashMap` shard per entity name.
///
/// Each operation holds its entity's shard lock for its whole duration, so
/// `create_if_absent` is atomic against concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryEntityStore {
    tables: Arc<DashMap<String, Vec<Record>>>,
}

impl MemoryEntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert records as-is (after stamping), bypassing any checks.
    pub fn seed(&self, entity: &str, records: impl IntoIterator<Item = Record>) {
        let mut table = self.tables.entry(entity.to_string()).or_default();
        table.extend(records.into_iter().map(stamp));
    }

    /// Number of stored records for an entity.
    pub fn len(&self, entity: &str) -> usize {
        self.tables.get(entity).map(|t| t.len()).unwrap_or(0)
    }

    /// Whether the entity has no stored records.
    pub fn is_empty(&self, entity: &str) -> bool {
        self.len(entity) == 0
    }
}

#[async_trait]
impl EntityApi for MemoryEntityStore {
    async fn create(&self, entity: &str, fields: Record) -> AppResult<Record> {
        let record = stamp(fields);
        self.tables
            .entry(entity.to_string())
            .or_default()
            .push(record.clone());
        debug!(entity, "Created record");
        Ok(record)
    }

    async fn find_all(&self, entity: &str, query: &Query) -> AppResult<Vec<Record>> {
        let Some(table) = self.tables.get(entity) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Record> = table
            .iter()
            .filter(|r| query.filter.matches(r))
            .cloned()
            .collect();
        drop(table);

        if let Some(order) = &query.order {
            matched.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.field), b.get(&order.field));
                match order.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_one(&self, entity: &str, filter: &Where) -> AppResult<Option<Record>> {
        Ok(self
            .tables
            .get(entity)
            .and_then(|t| t.iter().find(|r| filter.matches(r)).cloned()))
    }

    async fn update(&self, entity: &str, fields: Record, filter: &Where) -> AppResult<u64> {
        let Some(mut table) = self.tables.get_mut(entity) else {
            return Ok(0);
        };

        let mut affected = 0;
        for record in table.iter_mut().filter(|r| filter.matches(r)) {
            record.extend(fields.clone());
            affected += 1;
        }
        debug!(entity, affected, "Updated records");
        Ok(affected)
    }

    async fn destroy(&self, entity: &str, filter: &Where) -> AppResult<u64> {
        let Some(mut table) = self.tables.get_mut(entity) else {
            return Ok(0);
        };

        let before = table.len();
        table.retain(|r| !filter.matches(r));
        let removed = (before - table.len()) as u64;
        debug!(entity, removed, "Destroyed records");
        Ok(removed)
    }

    async fn count(&self, entity: &str, filter: &Where) -> AppResult<u64> {
        Ok(self
            .tables
            .get(entity)
            .map(|t| t.iter().filter(|r| filter.matches(r)).count() as u64)
            .unwrap_or(0))
    }

    async fn list(&self, entity: &str) -> AppResult<Vec<Record>> {
        Ok(self
            .tables
            .get(entity)
            .map(|t| t.clone())
            .unwrap_or_default())
    }

    async fn create_if_absent(
        &self,
        entity: &str,
        filter: &Where,
        fields: Record,
    ) -> AppResult<Option<Record>> {
        let mut table = self.tables.entry(entity.to_string()).or_default();
        if table.iter().any(|r| filter.matches(r)) {
            return Ok(None);
        }

        let record = stamp(fields);
        table.push(record.clone());
        Ok(Some(record))
    }
}

/// Order two optional JSON values: missing and null first, then booleans,
/// numbers and strings by value. Mixed types compare by type rank.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
