//! Application state shared across all handlers.

use std::sync::Arc;

use marketdesk_core::config::AppConfig;
use marketdesk_core::traits::EntityApi;
use marketdesk_service::{EntityConfigService, NotificationService, WatchlistService};

use crate::controllers::{NotificationController, WatchlistController};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Entity API backend
    pub entity_api: Arc<dyn EntityApi>,
    /// Notification controller
    pub notifications: Arc<NotificationController>,
    /// Watchlist controller
    pub watchlist: Arc<WatchlistController>,
    /// Entity config listing
    pub entity_configs: Arc<EntityConfigService>,
}

impl AppState {
    /// Wire services and controllers over one Entity API backend.
    pub fn new(config: AppConfig, entity_api: Arc<dyn EntityApi>) -> Self {
        let notification_service =
            NotificationService::new(Arc::clone(&entity_api), config.notifications.clone());
        let watchlist_service = WatchlistService::new(Arc::clone(&entity_api));

        Self {
            config: Arc::new(config),
            notifications: Arc::new(NotificationController::new(notification_service)),
            watchlist: Arc::new(WatchlistController::new(watchlist_service)),
            entity_configs: Arc::new(EntityConfigService::new(Arc::clone(&entity_api))),
            entity_api,
        }
    }
}
