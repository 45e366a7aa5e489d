//! Notification defaults.

use serde::{Deserialize, Serialize};

/// Defaults applied by the notification service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Page size when the caller does not supply `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    /// Offset when the caller does not supply `offset`.
    #[serde(default)]
    pub default_offset: u64,
    /// Notification type when the caller does not supply one.
    #[serde(default = "default_type")]
    pub default_type: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_offset: 0,
            default_type: default_type(),
        }
    }
}

fn default_limit() -> u64 {
    50
}

fn default_type() -> String {
    "system".to_string()
}
