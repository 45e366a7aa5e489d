//! Notification controller.

use uuid::Uuid;

use marketdesk_core::types::Envelope;
use marketdesk_entity::notification::{
    BulkNotification, NewNotification, Notification, NotificationFilters,
};
use marketdesk_service::NotificationService;

use super::failure;

/// Envelope surface over [`NotificationService`].
#[derive(Debug, Clone)]
pub struct NotificationController {
    service: NotificationService,
}

impl NotificationController {
    /// Creates a new notification controller.
    pub fn new(service: NotificationService) -> Self {
        Self { service }
    }

    /// Creates a notification for one user.
    pub async fn create_notification(&self, data: NewNotification) -> Envelope<Notification> {
        match self.service.create_notification(data).await {
            Ok(notification) => {
                Envelope::ok(notification).with_message("Notification created successfully")
            }
            Err(e) => failure("create_notification", e),
        }
    }

    /// Lists a user's notifications.
    ///
    /// `count` is the number of notifications returned.
    pub async fn get_user_notifications(
        &self,
        user_id: Uuid,
        filters: NotificationFilters,
    ) -> Envelope<Vec<Notification>> {
        match self.service.get_user_notifications(user_id, filters).await {
            Ok(notifications) => {
                let count = notifications.len() as u64;
                Envelope::ok(notifications).with_count(count)
            }
            Err(e) => failure("get_user_notifications", e),
        }
    }

    /// Marks one notification as read.
    ///
    /// `data` is the number of notifications updated.
    pub async fn mark_as_read(&self, notification_id: Uuid) -> Envelope<u64> {
        match self.service.mark_as_read(notification_id).await {
            Ok(updated) => Envelope::ok(updated).with_message("Notification marked as read"),
            Err(e) => failure("mark_as_read", e),
        }
    }

    /// Marks every unread notification of a user as read.
    pub async fn mark_all_as_read(&self, user_id: Uuid) -> Envelope<u64> {
        match self.service.mark_all_as_read(user_id).await {
            Ok(marked) => Envelope::ok(marked)
                .with_count(marked)
                .with_message("All notifications marked as read"),
            Err(e) => failure("mark_all_as_read", e),
        }
    }

    /// Counts a user's unread notifications.
    ///
    /// Always succeeds; a failed count reads as 0.
    pub async fn get_unread_count(&self, user_id: Uuid) -> Envelope<u64> {
        let count = self.service.get_unread_count(user_id).await;
        Envelope::ok(count).with_count(count)
    }

    /// Sends the same notification to each user, stopping at the first failure.
    pub async fn send_bulk_notifications(
        &self,
        user_ids: &[Uuid],
        data: &BulkNotification,
    ) -> Envelope<Vec<Notification>> {
        match self.service.send_bulk_notifications(user_ids, data).await {
            Ok(sent) => {
                let count = sent.len() as u64;
                Envelope::ok(sent)
                    .with_count(count)
                    .with_message(format!("Sent {count} notifications"))
            }
            Err(e) => failure("send_bulk_notifications", e),
        }
    }

    /// Deletes one notification.
    pub async fn delete_notification(&self, notification_id: Uuid) -> Envelope<u64> {
        match self.service.delete_notification(notification_id).await {
            Ok(removed) => Envelope::ok(removed).with_message("Notification deleted successfully"),
            Err(e) => failure("delete_notification", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use marketdesk_core::config::NotificationConfig;
    use marketdesk_core::error::ErrorKind;
    use marketdesk_database::MemoryEntityStore;

    use crate::controllers::test_support::UnavailableStore;

    fn controller() -> NotificationController {
        NotificationController::new(NotificationService::new(
            Arc::new(MemoryEntityStore::new()),
            NotificationConfig::default(),
        ))
    }

    fn new_notification(user_id: Uuid) -> NewNotification {
        NewNotification {
            user_id,
            title: "Earnings".to_string(),
            message: "MSFT reports today".to_string(),
            notification_type: None,
            reference_id: None,
            reference_type: None,
            action_url: Some("/stocks/MSFT".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_wraps_in_success_envelope() {
        let controller = controller();
        let envelope = controller
            .create_notification(new_notification(Uuid::new_v4()))
            .await;

        assert!(envelope.success);
        assert!(envelope.error.is_none());
        assert_eq!(
            envelope.message.as_deref(),
            Some("Notification created successfully")
        );
        let data = envelope.data.unwrap();
        assert_eq!(data.notification_type, "system");
        assert_eq!(data.action_url.as_deref(), Some("/stocks/MSFT"));
    }

    #[tokio::test]
    async fn test_list_carries_count() {
        let controller = controller();
        let user = Uuid::new_v4();
        controller.create_notification(new_notification(user)).await;
        controller.create_notification(new_notification(user)).await;

        let envelope = controller
            .get_user_notifications(user, NotificationFilters::default())
            .await;
        assert!(envelope.success);
        assert_eq!(envelope.count, Some(2));
    }

    #[tokio::test]
    async fn test_unread_count_in_data_and_count() {
        let controller = controller();
        let user = Uuid::new_v4();
        let created = controller
            .create_notification(new_notification(user))
            .await
            .data
            .unwrap();
        controller.create_notification(new_notification(user)).await;
        controller.mark_as_read(created.id).await;

        let envelope = controller.get_unread_count(user).await;
        assert_eq!(envelope.data, Some(1));
        assert_eq!(envelope.count, Some(1));
    }

    #[tokio::test]
    async fn test_bulk_send_reports_count() {
        let controller = controller();
        let users = [Uuid::new_v4(), Uuid::new_v4()];
        let data = BulkNotification {
            title: "Market closed".to_string(),
            message: "Holiday schedule".to_string(),
            notification_type: Some("market".to_string()),
            reference_id: None,
            reference_type: None,
            action_url: None,
        };

        let envelope = controller.send_bulk_notifications(&users, &data).await;
        assert!(envelope.success);
        assert_eq!(envelope.count, Some(2));
        assert_eq!(envelope.message.as_deref(), Some("Sent 2 notifications"));
    }

    #[tokio::test]
    async fn test_mark_all_and_delete() {
        let controller = controller();
        let user = Uuid::new_v4();
        let created = controller
            .create_notification(new_notification(user))
            .await
            .data
            .unwrap();

        let envelope = controller.mark_all_as_read(user).await;
        assert_eq!(envelope.data, Some(1));

        let envelope = controller.delete_notification(created.id).await;
        assert_eq!(envelope.data, Some(1));

        let envelope = controller.delete_notification(created.id).await;
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(0));
        assert!(envelope.code.is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_failure_envelope() {
        let controller = NotificationController::new(NotificationService::new(
            Arc::new(UnavailableStore),
            NotificationConfig::default(),
        ));

        let envelope = controller
            .create_notification(new_notification(Uuid::new_v4()))
            .await;
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.code, Some(ErrorKind::Database));
        assert!(envelope.error.unwrap().contains("store offline"));

        let envelope = controller.get_unread_count(Uuid::new_v4()).await;
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(0));
    }
}
