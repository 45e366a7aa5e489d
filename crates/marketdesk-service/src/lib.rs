//! # marketdesk-service
//!
//! Business logic service layer for MarketDesk. Services translate domain
//! calls into Entity API calls; every dependency is injected at construction
//! time as an `Arc<dyn EntityApi>`.
//!
//! The [`entity_config`] module also hosts the client-side provider that
//! loads admin entity configurations once per mount.

pub mod entity_config;
pub mod notification;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod test_support;

pub use entity_config::{
    EntityConfigProvider, EntityConfigService, EntityConfigState, EntityConfigs, LoadPhase,
    use_entity_configs,
};
pub use notification::NotificationService;
pub use watchlist::WatchlistService;
