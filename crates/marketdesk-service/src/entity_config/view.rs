//! Derived read-side view over the provider state.

use tracing::{debug, warn};

use marketdesk_entity::entity_config::EntityConfig;

use super::provider::{EntityConfigProvider, EntityConfigState};

/// Filtered accessors over one snapshot of the provider state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityConfigs {
    state: EntityConfigState,
}

impl EntityConfigs {
    /// A view over the given state.
    pub fn new(state: EntityConfigState) -> Self {
        Self { state }
    }

    /// Every loaded config.
    pub fn configs(&self) -> &[EntityConfig] {
        &self.state.configs
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// The load failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// The underlying state snapshot.
    pub fn state(&self) -> &EntityConfigState {
        &self.state
    }

    /// Configs with `enabled` set.
    pub fn enabled_configs(&self) -> Vec<&EntityConfig> {
        self.filtered(|c| c.enabled)
    }

    /// Enabled configs shown to regular users.
    pub fn user_visible_configs(&self) -> Vec<&EntityConfig> {
        self.filtered(|c| c.enabled && c.user_visible)
    }

    /// Enabled configs shown to administrators.
    pub fn admin_visible_configs(&self) -> Vec<&EntityConfig> {
        self.filtered(|c| c.enabled && c.admin_visible)
    }

    /// The first config whose `entity_name` equals `name`.
    pub fn config_by_entity_name(&self, name: &str) -> Option<&EntityConfig> {
        self.state.configs.iter().find(|c| c.entity_name == name)
    }

    /// Does nothing; configs load once per mount.
    pub fn refresh(&self) {
        debug!("Entity config refresh requested; configs load once per mount");
    }

    fn filtered(&self, keep: impl Fn(&EntityConfig) -> bool) -> Vec<&EntityConfig> {
        self.state.configs.iter().filter(|&c| keep(c)).collect()
    }
}

/// Snapshot the provider state into an [`EntityConfigs`] view.
///
/// Outside a provider the view is empty and not loading.
pub fn use_entity_configs(provider: Option<&EntityConfigProvider>) -> EntityConfigs {
    match provider {
        Some(provider) => EntityConfigs::new(provider.state()),
        None => {
            warn!("Entity configs requested outside a provider; using empty defaults");
            EntityConfigs::default()
        }
    }
}
