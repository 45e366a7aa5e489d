//! Query types for the Entity API.
//!
//! Filters are plain equality maps: a record matches a [`Where`] when every
//! key in the filter is present in the record with an equal JSON value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored entity record as a JSON object.
pub type Record = Map<String, Value>;

/// Equality filter over record fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Where(pub Map<String, Value>);

impl Where {
    /// An empty filter, matching every record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Merge every entry of `fields` into the filter, overwriting duplicates.
    pub fn extend(mut self, fields: Map<String, Value>) -> Self {
        self.0.extend(fields);
        self
    }

    /// Whether `record` satisfies every condition.
    pub fn matches(&self, record: &Record) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

/// A sort specification on a record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortField {
    /// Sort descending on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Sort ascending on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }
}

/// A `find_all` query: filter, optional order, optional window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Equality filter.
    #[serde(rename = "where", default)]
    pub filter: Where,
    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Number of matching records to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Result ordering. Backends fall back to insertion order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortField>,
}

impl Query {
    /// A query with the given filter and no window.
    pub fn filter(filter: Where) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Set the limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the ordering.
    pub fn order_by(mut self, order: SortField) -> Self {
        self.order = Some(order);
        self
    }
}
