//! HTTP request handlers.

pub mod entity_config;
pub mod health;
pub mod notification;
pub mod watchlist;
