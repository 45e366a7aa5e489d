//! # marketdesk-core
//!
//! Core crate for MarketDesk. Contains the Entity API trait that every
//! persistence backend implements, configuration schemas, query and
//! envelope types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other MarketDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
