//! Core type definitions used across the MarketDesk workspace.

pub mod envelope;
pub mod query;

pub use envelope::Envelope;
pub use query::{Query, Record, SortDirection, SortField, Where};
