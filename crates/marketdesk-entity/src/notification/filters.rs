//! Caller-supplied notification listing filters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filters for listing a user's notifications.
///
/// `fields` is forwarded into the storage filter verbatim. There is no
/// allow-list: any key the caller names is matched against stored records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFilters {
    /// Page size; the service default applies when absent.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Rows to skip; the service default applies when absent.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Additional equality filters on stored fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NotificationFilters {
    /// Only unread notifications.
    pub fn unread() -> Self {
        Self::default().field("is_read", false)
    }

    /// Add an equality filter.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the page window.
    pub fn page(mut self, limit: u64, offset: u64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}
