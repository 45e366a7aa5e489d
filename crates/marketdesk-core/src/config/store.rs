//! Entity API backend selection.

use serde::{Deserialize, Serialize};

/// Which persistence backend serves the Entity API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store. Data is lost on restart.
    #[default]
    Memory,
    /// PostgreSQL, configured by the `database` section.
    Postgres,
}

impl StoreBackend {
    /// The backend name as written in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StoreBackend,
}
