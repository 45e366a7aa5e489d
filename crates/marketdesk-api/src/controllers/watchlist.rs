//! Watchlist controller.

use uuid::Uuid;

use marketdesk_core::types::Envelope;
use marketdesk_entity::watchlist::{NewWatchlistEntry, WatchlistEntry};
use marketdesk_service::WatchlistService;

use super::failure;

/// Envelope surface over [`WatchlistService`].
#[derive(Debug, Clone)]
pub struct WatchlistController {
    service: WatchlistService,
}

impl WatchlistController {
    /// Creates a new watchlist controller.
    pub fn new(service: WatchlistService) -> Self {
        Self { service }
    }

    /// Adds a stock to a user's watchlist.
    pub async fn add_to_watchlist(&self, data: NewWatchlistEntry) -> Envelope<WatchlistEntry> {
        match self.service.add_to_watchlist(data).await {
            Ok(entry) => Envelope::ok(entry).with_message("Stock added to watchlist"),
            Err(e) => failure("add_to_watchlist", e),
        }
    }

    /// Removes a stock from a user's watchlist.
    pub async fn remove_from_watchlist(
        &self,
        user_id: Uuid,
        stock_symbol: &str,
    ) -> Envelope<WatchlistEntry> {
        match self.service.remove_from_watchlist(user_id, stock_symbol).await {
            Ok(entry) => Envelope::ok(entry).with_message("Stock removed from watchlist"),
            Err(e) => failure("remove_from_watchlist", e),
        }
    }

    /// Replaces the notes of a watchlist entry.
    ///
    /// `data` is the number of entries updated.
    pub async fn update_notes(
        &self,
        user_id: Uuid,
        stock_symbol: &str,
        notes: Option<String>,
    ) -> Envelope<u64> {
        match self.service.update_notes(user_id, stock_symbol, notes).await {
            Ok(updated) => Envelope::ok(updated).with_message("Notes updated successfully"),
            Err(e) => failure("update_notes", e),
        }
    }

    /// Whether the stock is on the user's watchlist.
    ///
    /// Always succeeds; a failed lookup reads as `false`.
    pub async fn is_in_watchlist(&self, user_id: Uuid, stock_symbol: &str) -> Envelope<bool> {
        Envelope::ok(self.service.is_in_watchlist(user_id, stock_symbol).await)
    }

    /// Lists a user's watchlist. `count` is the number of entries.
    pub async fn get_user_watchlist(&self, user_id: Uuid) -> Envelope<Vec<WatchlistEntry>> {
        match self.service.get_user_watchlist(user_id).await {
            Ok(entries) => {
                let count = entries.len() as u64;
                Envelope::ok(entries).with_count(count)
            }
            Err(e) => failure("get_user_watchlist", e),
        }
    }
}
