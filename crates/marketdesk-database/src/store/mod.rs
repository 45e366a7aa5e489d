//! Entity API backends.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use marketdesk_core::config::{AppConfig, StoreBackend};
use marketdesk_core::result::AppResult;
use marketdesk_core::traits::EntityApi;
use marketdesk_core::types::Record;

pub use memory::MemoryEntityStore;
pub use postgres::PgEntityStore;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

/// Build the Entity API backend selected by `store.backend`.
///
/// The Postgres backend connects and runs migrations before returning.
pub async fn connect_entity_api(config: &AppConfig) -> AppResult<Arc<dyn EntityApi>> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory entity store");
            Ok(Arc::new(MemoryEntityStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            run_migrations(pool.pool()).await?;
            info!("Using PostgreSQL entity store");
            Ok(Arc::new(PgEntityStore::new(pool.into_pool())))
        }
    }
}

/// Fill `id` and `created_at` when the caller did not supply them.
pub(crate) fn stamp(mut fields: Record) -> Record {
    fields
        .entry("id")
        .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
    fields
        .entry("created_at")
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stamp_keeps_supplied_values() {
        let mut fields = Record::new();
        fields.insert("id".into(), json!("fixed"));
        let stamped = stamp(fields);
        assert_eq!(stamped.get("id"), Some(&json!("fixed")));
        assert!(stamped.get("created_at").is_some_and(Value::is_string));
    }

    #[tokio::test]
    async fn test_memory_backend_is_default() {
        let api = connect_entity_api(&AppConfig::default()).await.unwrap();
        assert!(api.health_check().await.unwrap());
    }
}
