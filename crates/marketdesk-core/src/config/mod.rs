//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `MARKETDESK__`-prefixed environment variables. Every
//! section has serde defaults, so an empty source yields a usable config.

pub mod app;
pub mod database;
pub mod entity_config;
pub mod logging;
pub mod notification;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::entity_config::EntityConfigSettings;
pub use self::logging::LoggingConfig;
pub use self::notification::NotificationConfig;
pub use self::store::{StoreBackend, StoreConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Which Entity API backend to use.
    #[serde(default)]
    pub store: StoreConfig,
    /// PostgreSQL settings (used by the `postgres` store backend).
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Entity configuration loading behaviour.
    #[serde(default)]
    pub entity_config: EntityConfigSettings,
    /// Notification defaults.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment.
    ///
    /// Merges `config/default`, `config/{env}` and environment variables
    /// such as `MARKETDESK__SERVER__PORT=9000`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(environment())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from a TOML string, ignoring files and environment.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

/// `MARKETDESK__` variables. List settings take comma-separated values.
fn environment() -> config::Environment {
    config::Environment::with_prefix("MARKETDESK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("entity_config.admin_roles")
}
