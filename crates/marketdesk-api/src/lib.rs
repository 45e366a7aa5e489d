//! # marketdesk-api
//!
//! HTTP API layer for MarketDesk built on Axum.
//!
//! Controllers wrap every service call in an [`Envelope`]; handlers expose
//! the controllers as REST endpoints. Failures travel as `success: false`
//! envelopes with HTTP 200, never as error status codes.
//!
//! [`Envelope`]: marketdesk_core::types::Envelope

pub mod controllers;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use controllers::{NotificationController, WatchlistController};
pub use router::build_router;
pub use state::AppState;
