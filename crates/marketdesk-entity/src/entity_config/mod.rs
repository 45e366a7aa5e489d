//! Entity configuration records.

pub mod model;

pub use model::EntityConfig;
