//! Entity configuration loading settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the entity configuration provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfigSettings {
    /// Delay before the admin config fetch, in milliseconds.
    ///
    /// Spaces the fetch away from the burst of requests issued on startup,
    /// which otherwise trips the upstream rate limiter.
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    /// Roles allowed to load entity configurations.
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
}

impl EntityConfigSettings {
    /// The fetch delay as a [`Duration`].
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    /// Whether the given role name may load entity configurations.
    pub fn is_admin_role(&self, role: &str) -> bool {
        self.admin_roles.iter().any(|r| r == role)
    }
}

impl Default for EntityConfigSettings {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            admin_roles: default_admin_roles(),
        }
    }
}

fn default_fetch_delay_ms() -> u64 {
    2000
}

fn default_admin_roles() -> Vec<String> {
    vec!["admin".to_string(), "super_admin".to_string()]
}
