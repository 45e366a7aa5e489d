//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when the store answered, `degraded` otherwise.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Configured store backend.
    pub store: String,
}
