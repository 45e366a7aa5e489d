//! # marketdesk-entity
//!
//! Domain entity models for MarketDesk. Stored models implement
//! [`EntityModel`](marketdesk_core::traits::EntityModel) and round-trip
//! through the Entity API as JSON records; input types mirror the camelCase
//! shapes callers send.

pub mod entity_config;
pub mod notification;
pub mod user;
pub mod watchlist;
