//! Notification domain entities.

pub mod filters;
pub mod model;

pub use filters::NotificationFilters;
pub use model::{BulkNotification, NewNotification, Notification};
