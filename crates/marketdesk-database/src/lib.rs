//! # marketdesk-database
//!
//! Entity API backends for MarketDesk: a process-local store used in
//! development and tests, and a PostgreSQL store that keeps every entity in
//! one JSONB-backed table.

pub mod connection;
pub mod migration;
pub mod store;

pub use connection::DatabasePool;
pub use store::{MemoryEntityStore, PgEntityStore, connect_entity_api};
