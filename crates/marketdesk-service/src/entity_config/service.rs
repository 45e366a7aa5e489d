//! Server-side entity configuration listing.

use std::sync::Arc;

use tracing::debug;

use marketdesk_core::result::AppResult;
use marketdesk_core::traits::EntityApi;
use marketdesk_entity::entity_config::EntityConfig;

use super::source::{ConfigSource, EntityApiConfigSource, coerce_configs};

/// Lists entity configurations stored in the Entity API.
#[derive(Debug, Clone)]
pub struct EntityConfigService {
    source: EntityApiConfigSource,
}

impl EntityConfigService {
    /// Creates a new entity config service.
    pub fn new(api: Arc<dyn EntityApi>) -> Self {
        Self {
            source: EntityApiConfigSource::new(api),
        }
    }

    /// Every stored config that deserializes cleanly.
    pub async fn list_configs(&self) -> AppResult<Vec<EntityConfig>> {
        let configs = coerce_configs(self.source.fetch_configs().await?);
        debug!(count = configs.len(), "Listed entity configs");
        Ok(configs)
    }
}
