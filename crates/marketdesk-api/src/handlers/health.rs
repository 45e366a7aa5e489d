//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use marketdesk_core::types::Envelope;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<Envelope<HealthResponse>> {
    let status = match state.entity_api.health_check().await {
        Ok(true) => "ok",
        Ok(false) => "degraded",
        Err(e) => {
            warn!(error = %e, "Entity store health check failed");
            "degraded"
        }
    };

    Json(Envelope::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.config.store.backend.as_str().to_string(),
    }))
}
