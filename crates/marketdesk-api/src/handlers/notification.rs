//! Notification handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use marketdesk_core::types::Envelope;
use marketdesk_entity::notification::Notification;

use crate::controllers::failure;
use crate::dto::request::{
    BulkNotificationRequest, CreateNotificationRequest, notification_filters, validated,
};
use crate::state::AppState;

/// POST /api/notifications
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateNotificationRequest>,
) -> Json<Envelope<Notification>> {
    let envelope = match validated(req) {
        Ok(req) => state.notifications.create_notification(req.into()).await,
        Err(e) => failure("create_notification", e),
    };
    Json(envelope)
}

/// GET /api/users/{user_id}/notifications
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Envelope<Vec<Notification>>> {
    let envelope = match notification_filters(params) {
        Ok(filters) => {
            state
                .notifications
                .get_user_notifications(user_id, filters)
                .await
        }
        Err(e) => failure("get_user_notifications", e),
    };
    Json(envelope)
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<Envelope<u64>> {
    Json(state.notifications.mark_as_read(id).await)
}

/// PUT /api/users/{user_id}/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Json<Envelope<u64>> {
    Json(state.notifications.mark_all_as_read(user_id).await)
}

/// GET /api/users/{user_id}/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Json<Envelope<u64>> {
    Json(state.notifications.get_unread_count(user_id).await)
}

/// POST /api/notifications/bulk
pub async fn send_bulk(
    State(state): State<AppState>,
    Json(req): Json<BulkNotificationRequest>,
) -> Json<Envelope<Vec<Notification>>> {
    let envelope = match validated(req) {
        Ok(req) => {
            let (user_ids, data) = req.into_parts();
            state
                .notifications
                .send_bulk_notifications(&user_ids, &data)
                .await
        }
        Err(e) => failure("send_bulk_notifications", e),
    };
    Json(envelope)
}

/// DELETE /api/notifications/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<Envelope<u64>> {
    Json(state.notifications.delete_notification(id).await)
}
