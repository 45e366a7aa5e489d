//! Entity configuration handlers.

use axum::Json;
use axum::extract::State;
use tracing::error;

use marketdesk_core::types::Envelope;
use marketdesk_entity::entity_config::EntityConfig;

use crate::state::AppState;

/// GET /api/entity-configs
pub async fn list_configs(State(state): State<AppState>) -> Json<Envelope<Vec<EntityConfig>>> {
    let envelope = match state.entity_configs.list_configs().await {
        Ok(configs) => {
            let count = configs.len() as u64;
            Envelope::ok(configs).with_count(count)
        }
        Err(e) => {
            error!(error = %e, "Failed to list entity configs");
            Envelope::fail(&e)
        }
    };
    Json(envelope)
}
