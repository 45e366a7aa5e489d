//! Entity configuration: server-side listing and the client-side provider.

pub mod provider;
pub mod service;
pub mod source;
pub mod view;

pub use provider::{EntityConfigProvider, EntityConfigState, LoadPhase};
pub use service::EntityConfigService;
pub use source::{
    ConfigSource, CurrentUserSource, EntityApiConfigSource, StaticUserSource, coerce_configs,
};
pub use view::{EntityConfigs, use_entity_configs};
