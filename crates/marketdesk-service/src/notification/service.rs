//! Notification CRUD over the Entity API.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use marketdesk_core::config::NotificationConfig;
use marketdesk_core::result::AppResult;
use marketdesk_core::traits::entity_api::to_record;
use marketdesk_core::traits::{EntityApi, EntityTable};
use marketdesk_core::types::{Query, SortField, Where};
use marketdesk_entity::notification::{
    BulkNotification, NewNotification, Notification, NotificationFilters,
};

/// Storage shape of a new notification.
#[derive(Debug, Serialize)]
struct NotificationFields<'a> {
    user_id: Uuid,
    title: &'a str,
    message: &'a str,
    #[serde(rename = "type")]
    notification_type: &'a str,
    reference_id: Option<&'a str>,
    reference_type: Option<&'a str>,
    action_url: Option<&'a str>,
    is_read: bool,
}

impl<'a> NotificationFields<'a> {
    fn from_input(input: &'a NewNotification, default_type: &'a str) -> Self {
        Self {
            user_id: input.user_id,
            title: &input.title,
            message: &input.message,
            notification_type: input.notification_type.as_deref().unwrap_or(default_type),
            reference_id: input.reference_id.as_deref(),
            reference_type: input.reference_type.as_deref(),
            action_url: input.action_url.as_deref(),
            is_read: false,
        }
    }
}

fn by_id(notification_id: Uuid) -> Where {
    Where::new().eq("id", notification_id.to_string())
}

fn by_user(user_id: Uuid) -> Where {
    Where::new().eq("user_id", user_id.to_string())
}

fn read_fields() -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("is_read".to_string(), Value::Bool(true));
    fields
}

/// Manages user notifications.
///
/// Updates are per-record and not transactional: a failure part-way through
/// [`mark_all_as_read`](Self::mark_all_as_read) or
/// [`send_bulk_notifications`](Self::send_bulk_notifications) leaves the
/// records already written in place.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: EntityTable<Notification>,
    defaults: NotificationConfig,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(api: Arc<dyn EntityApi>, defaults: NotificationConfig) -> Self {
        Self {
            notifications: EntityTable::new(api),
            defaults,
        }
    }

    /// Stores a notification, defaulting its type.
    pub async fn create_notification(&self, data: NewNotification) -> AppResult<Notification> {
        let fields = to_record(&NotificationFields::from_input(
            &data,
            &self.defaults.default_type,
        ))?;

        let created = self
            .notifications
            .create(fields)
            .await
            .map_err(|e| e.context("Failed to create notification"))?;

        info!(
            notification_id = %created.id,
            user_id = %created.user_id,
            notification_type = %created.notification_type,
            "Notification created"
        );
        Ok(created)
    }

    /// Lists a user's notifications, newest first.
    ///
    /// Every key in `filters.fields` is forwarded to the storage filter.
    /// The `user_id` scope is applied last and cannot be overridden.
    pub async fn get_user_notifications(
        &self,
        user_id: Uuid,
        filters: NotificationFilters,
    ) -> AppResult<Vec<Notification>> {
        let filter = Where::new()
            .extend(filters.fields)
            .eq("user_id", user_id.to_string());
        let query = Query::filter(filter)
            .limit(filters.limit.unwrap_or(self.defaults.default_limit))
            .offset(filters.offset.unwrap_or(self.defaults.default_offset))
            .order_by(SortField::desc("created_at"));

        let notifications = self
            .notifications
            .find_all(&query)
            .await
            .map_err(|e| e.context("Failed to list notifications"))?;

        debug!(%user_id, returned = notifications.len(), "Listed notifications");
        Ok(notifications)
    }

    /// Marks one notification as read. Returns the number of records updated.
    pub async fn mark_as_read(&self, notification_id: Uuid) -> AppResult<u64> {
        let updated = self
            .notifications
            .update(read_fields(), &by_id(notification_id))
            .await
            .map_err(|e| e.context("Failed to mark notification as read"))?;

        debug!(%notification_id, updated, "Marked notification as read");
        Ok(updated)
    }

    /// Marks every unread notification of a user as read, one at a time.
    ///
    /// Returns how many were marked. Stops at the first failed update.
    pub async fn mark_all_as_read(&self, user_id: Uuid) -> AppResult<u64> {
        let unread = self
            .notifications
            .find_all(&Query::filter(by_user(user_id).eq("is_read", false)))
            .await
            .map_err(|e| e.context("Failed to load unread notifications"))?;

        let mut marked = 0;
        for notification in &unread {
            self.notifications
                .update(read_fields(), &by_id(notification.id))
                .await
                .map_err(|e| {
                    warn!(
                        %user_id,
                        marked,
                        remaining = unread.len() as u64 - marked,
                        "Mark-all-as-read stopped part-way"
                    );
                    e.context("Failed to mark notification as read")
                })?;
            marked += 1;
        }

        info!(%user_id, marked, "Marked all notifications as read");
        Ok(marked)
    }

    /// Counts a user's unread notifications. Returns 0 when the count fails.
    pub async fn get_unread_count(&self, user_id: Uuid) -> u64 {
        match self
            .notifications
            .count(&by_user(user_id).eq("is_read", false))
            .await
        {
            Ok(count) => count,
            Err(e) => {
                warn!(%user_id, error = %e, "Failed to count unread notifications; reporting 0");
                0
            }
        }
    }

    /// Sends the same notification to each user in order.
    ///
    /// The first failure aborts the remaining sends and is returned; the
    /// notifications created before it are kept.
    pub async fn send_bulk_notifications(
        &self,
        user_ids: &[Uuid],
        data: &BulkNotification,
    ) -> AppResult<Vec<Notification>> {
        let mut sent = Vec::with_capacity(user_ids.len());
        for &user_id in user_ids {
            let notification = self.create_notification(data.for_user(user_id)).await?;
            sent.push(notification);
        }

        info!(recipients = sent.len(), "Bulk notifications sent");
        Ok(sent)
    }

    /// Deletes a notification. Returns the number of records removed.
    pub async fn delete_notification(&self, notification_id: Uuid) -> AppResult<u64> {
        let removed = self
            .notifications
            .destroy(&by_id(notification_id))
            .await
            .map_err(|e| e.context("Failed to delete notification"))?;

        info!(%notification_id, removed, "Notification deleted");
        Ok(removed)
    }
}
