//! Entity configuration model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use marketdesk_core::traits::EntityModel;

/// Per-entity feature switches managed by administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Name of the configured entity.
    pub entity_name: String,
    /// Whether the entity is enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// Whether regular users see the entity.
    #[serde(default)]
    pub user_visible: bool,
    /// Whether administrators see the entity.
    #[serde(default)]
    pub admin_visible: bool,
    /// Every other stored field, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityModel for EntityConfig {
    const ENTITY: &'static str = "EntityConfig";
}

impl EntityConfig {
    /// A config with the given name and switches and no extra fields.
    pub fn new(
        entity_name: impl Into<String>,
        enabled: bool,
        user_visible: bool,
        admin_visible: bool,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            enabled,
            user_visible,
            admin_visible,
            extra: Map::new(),
        }
    }
}
