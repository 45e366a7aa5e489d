//! Watchlist entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketdesk_core::traits::EntityModel;

/// One stock on a user's watchlist.
///
/// At most one entry exists per (`user_id`, `stock_symbol`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Ticker symbol, stored as given.
    pub stock_symbol: String,
    /// Free-form user notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the entry was stored.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EntityModel for WatchlistEntry {
    const ENTITY: &'static str = "Watchlist";
}

/// Input for adding a stock to a watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistEntry {
    /// Owning user.
    pub user_id: Uuid,
    /// Ticker symbol.
    pub stock_symbol: String,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
}
