//! Collaborators the entity configuration provider reads from.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use marketdesk_core::result::AppResult;
use marketdesk_core::traits::{EntityApi, EntityModel};
use marketdesk_entity::entity_config::EntityConfig;
use marketdesk_entity::user::CurrentUser;

/// Resolves the signed-in user.
#[async_trait]
pub trait CurrentUserSource: Send + Sync + 'static {
    /// The current user, or `None` when nobody is signed in.
    async fn current_user(&self) -> AppResult<Option<CurrentUser>>;
}

/// Fetches the raw entity configuration list.
#[async_trait]
pub trait ConfigSource: Send + Sync + 'static {
    /// The configuration payload. Callers coerce it with [`coerce_configs`].
    async fn fetch_configs(&self) -> AppResult<Value>;
}

/// A fixed current user.
#[derive(Debug, Clone, Default)]
pub struct StaticUserSource(pub Option<CurrentUser>);

#[async_trait]
impl CurrentUserSource for StaticUserSource {
    async fn current_user(&self) -> AppResult<Option<CurrentUser>> {
        Ok(self.0.clone())
    }
}

/// Reads `EntityConfig` records from an Entity API.
#[derive(Debug, Clone)]
pub struct EntityApiConfigSource {
    api: Arc<dyn EntityApi>,
}

impl EntityApiConfigSource {
    /// Reads configs through the given Entity API.
    pub fn new(api: Arc<dyn EntityApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ConfigSource for EntityApiConfigSource {
    async fn fetch_configs(&self) -> AppResult<Value> {
        let records = self
            .api
            .list(EntityConfig::ENTITY)
            .await
            .map_err(|e| e.context("Failed to list entity configs"))?;
        Ok(Value::Array(records.into_iter().map(Value::Object).collect()))
    }
}

/// Turn a raw payload into configs.
///
/// Anything other than an array yields an empty list. Array elements that
/// are not valid configs are skipped.
pub fn coerce_configs(payload: Value) -> Vec<EntityConfig> {
    let Value::Array(items) = payload else {
        if !payload.is_null() {
            warn!("Entity config payload is not a list; using an empty list");
        }
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed entity config");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketdesk_database::MemoryEntityStore;
    use serde_json::json;

    #[test]
    fn test_non_list_payload_is_empty() {
        assert!(coerce_configs(json!({"entity_name": "Watchlist"})).is_empty());
        assert!(coerce_configs(json!("configs")).is_empty());
        assert!(coerce_configs(Value::Null).is_empty());
    }

    #[test]
    fn test_malformed_elements_are_skipped() {
        let configs = coerce_configs(json!([
            {"entity_name": "Watchlist", "enabled": true},
            42,
            {"enabled": true},
            {"entity_name": "Notification", "enabled": false}
        ]));
        let names: Vec<&str> = configs.iter().map(|c| c.entity_name.as_str()).collect();
        assert_eq!(names, ["Watchlist", "Notification"]);
    }

    #[tokio::test]
    async fn test_entity_api_source_lists_records() {
        let store = MemoryEntityStore::new();
        store.seed(
            EntityConfig::ENTITY,
            [json!({"entity_name": "Watchlist", "enabled": true})
                .as_object()
                .cloned()
                .unwrap()],
        );

        let source = EntityApiConfigSource::new(Arc::new(store));
        let configs = coerce_configs(source.fetch_configs().await.unwrap());
        assert_eq!(configs.len(), 1);
        assert!(configs[0].enabled);
        // Stamped fields are carried through as extras.
        assert!(configs[0].extra.contains_key("id"));
    }
}
