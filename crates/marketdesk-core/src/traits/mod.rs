//! Core traits defined in `marketdesk-core` and implemented by other crates.

pub mod entity_api;

pub use entity_api::{EntityApi, EntityModel, EntityTable};
