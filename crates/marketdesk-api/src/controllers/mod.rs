//! Envelope-producing controllers over the service layer.
//!
//! A controller method never returns an error: every failure is logged and
//! folded into a `success: false` envelope.

pub mod notification;
pub mod watchlist;

pub use notification::NotificationController;
pub use watchlist::WatchlistController;

use tracing::error;

use marketdesk_core::error::AppError;
use marketdesk_core::types::Envelope;

/// Log a failed operation and turn it into a failure envelope.
pub(crate) fn failure<T>(operation: &'static str, err: AppError) -> Envelope<T> {
    error!(operation, code = %err.kind, error = %err.message, "Controller operation failed");
    Envelope::fail(&err)
}
