//! Watchlist domain entities.

pub mod model;

pub use model::{NewWatchlistEntry, WatchlistEntry};
