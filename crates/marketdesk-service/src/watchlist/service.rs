//! Watchlist management over the Entity API.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use marketdesk_core::error::AppError;
use marketdesk_core::result::AppResult;
use marketdesk_core::traits::entity_api::to_record;
use marketdesk_core::traits::{EntityApi, EntityTable};
use marketdesk_core::types::{Query, SortField, Where};
use marketdesk_entity::watchlist::{NewWatchlistEntry, WatchlistEntry};

/// Storage shape of a new watchlist entry.
#[derive(Debug, Serialize)]
struct WatchlistFields<'a> {
    user_id: Uuid,
    stock_symbol: &'a str,
    notes: Option<&'a str>,
}

fn by_pair(user_id: Uuid, stock_symbol: &str) -> Where {
    Where::new()
        .eq("user_id", user_id.to_string())
        .eq("stock_symbol", stock_symbol)
}

/// Manages per-user stock watchlists.
///
/// A user holds at most one entry per stock symbol. Symbols are matched
/// exactly as given.
#[derive(Debug, Clone)]
pub struct WatchlistService {
    entries: EntityTable<WatchlistEntry>,
}

impl WatchlistService {
    /// Creates a new watchlist service.
    pub fn new(api: Arc<dyn EntityApi>) -> Self {
        Self {
            entries: EntityTable::new(api),
        }
    }

    /// Adds a stock to a user's watchlist.
    ///
    /// The existence check and the insert are one atomic backend call, so
    /// concurrent adds of the same pair store a single entry.
    pub async fn add_to_watchlist(&self, data: NewWatchlistEntry) -> AppResult<WatchlistEntry> {
        let fields = to_record(&WatchlistFields {
            user_id: data.user_id,
            stock_symbol: &data.stock_symbol,
            notes: data.notes.as_deref(),
        })?;

        let created = self
            .entries
            .create_if_absent(&by_pair(data.user_id, &data.stock_symbol), fields)
            .await
            .map_err(|e| e.context("Failed to add to watchlist"))?;

        match created {
            Some(entry) => {
                info!(
                    user_id = %entry.user_id,
                    stock_symbol = %entry.stock_symbol,
                    "Added stock to watchlist"
                );
                Ok(entry)
            }
            None => Err(AppError::conflict("Stock already in watchlist")),
        }
    }

    /// Removes a stock from a user's watchlist, returning the removed entry.
    pub async fn remove_from_watchlist(
        &self,
        user_id: Uuid,
        stock_symbol: &str,
    ) -> AppResult<WatchlistEntry> {
        let entry = self
            .entries
            .find_one(&by_pair(user_id, stock_symbol))
            .await
            .map_err(|e| e.context("Failed to look up watchlist entry"))?
            .ok_or_else(|| AppError::not_found("Stock not found in watchlist"))?;

        self.entries
            .destroy(&Where::new().eq("id", entry.id.to_string()))
            .await
            .map_err(|e| e.context("Failed to remove from watchlist"))?;

        info!(%user_id, stock_symbol, "Removed stock from watchlist");
        Ok(entry)
    }

    /// Replaces the notes of an entry. Returns the number of entries
    /// updated, which is 0 when the stock is not on the watchlist.
    pub async fn update_notes(
        &self,
        user_id: Uuid,
        stock_symbol: &str,
        notes: Option<String>,
    ) -> AppResult<u64> {
        let mut fields = Map::new();
        fields.insert(
            "notes".to_string(),
            notes.map(Value::String).unwrap_or(Value::Null),
        );

        let updated = self
            .entries
            .update(fields, &by_pair(user_id, stock_symbol))
            .await
            .map_err(|e| e.context("Failed to update watchlist notes"))?;

        debug!(%user_id, stock_symbol, updated, "Updated watchlist notes");
        Ok(updated)
    }

    /// Whether the stock is on the user's watchlist. Returns `false` when
    /// the lookup fails.
    pub async fn is_in_watchlist(&self, user_id: Uuid, stock_symbol: &str) -> bool {
        match self.entries.find_one(&by_pair(user_id, stock_symbol)).await {
            Ok(entry) => entry.is_some(),
            Err(e) => {
                warn!(
                    %user_id,
                    stock_symbol,
                    error = %e,
                    "Watchlist lookup failed; reporting not present"
                );
                false
            }
        }
    }

    /// Lists a user's watchlist in insertion order.
    pub async fn get_user_watchlist(&self, user_id: Uuid) -> AppResult<Vec<WatchlistEntry>> {
        let query = Query::filter(Where::new().eq("user_id", user_id.to_string()))
            .order_by(SortField::asc("created_at"));

        self.entries
            .find_all(&query)
            .await
            .map_err(|e| e.context("Failed to list watchlist"))
    }
}
