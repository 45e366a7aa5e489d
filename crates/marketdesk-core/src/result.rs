//! Convenience result type alias for MarketDesk.

use crate::error::AppError;

/// A specialized `Result` type for MarketDesk operations.
pub type AppResult<T> = Result<T, AppError>;
