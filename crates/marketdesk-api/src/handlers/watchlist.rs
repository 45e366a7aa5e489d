//! Watchlist handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use marketdesk_core::types::Envelope;
use marketdesk_entity::watchlist::WatchlistEntry;

use crate::controllers::failure;
use crate::dto::request::{AddToWatchlistRequest, UpdateNotesRequest, validated};
use crate::state::AppState;

/// POST /api/watchlist
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddToWatchlistRequest>,
) -> Json<Envelope<WatchlistEntry>> {
    let envelope = match validated(req) {
        Ok(req) => state.watchlist.add_to_watchlist(req.into()).await,
        Err(e) => failure("add_to_watchlist", e),
    };
    Json(envelope)
}

/// GET /api/users/{user_id}/watchlist
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Json<Envelope<Vec<WatchlistEntry>>> {
    Json(state.watchlist.get_user_watchlist(user_id).await)
}

/// DELETE /api/users/{user_id}/watchlist/{symbol}
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, symbol)): Path<(Uuid, String)>,
) -> Json<Envelope<WatchlistEntry>> {
    Json(state.watchlist.remove_from_watchlist(user_id, &symbol).await)
}

/// PUT /api/users/{user_id}/watchlist/{symbol}/notes
pub async fn update_notes(
    State(state): State<AppState>,
    Path((user_id, symbol)): Path<(Uuid, String)>,
    Json(req): Json<UpdateNotesRequest>,
) -> Json<Envelope<u64>> {
    Json(state.watchlist.update_notes(user_id, &symbol, req.notes).await)
}

/// GET /api/users/{user_id}/watchlist/{symbol}
pub async fn contains(
    State(state): State<AppState>,
    Path((user_id, symbol)): Path<(Uuid, String)>,
) -> Json<Envelope<bool>> {
    Json(state.watchlist.is_in_watchlist(user_id, &symbol).await)
}
