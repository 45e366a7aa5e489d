//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketdesk_core::traits::EntityModel;

/// A notification delivered to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Free-form notification type, `"system"` unless the caller chose one.
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Identifier of the object the notification refers to.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Kind of the referenced object.
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Where the UI should navigate when the notification is opened.
    #[serde(default)]
    pub action_url: Option<String>,
    /// Whether the user has read this notification.
    #[serde(default)]
    pub is_read: bool,
    /// When the notification was stored.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl EntityModel for Notification {
    const ENTITY: &'static str = "Notification";
}

/// Input for creating a single notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// Recipient.
    pub user_id: Uuid,
    /// Title.
    pub title: String,
    /// Body.
    pub message: String,
    /// Type; the service substitutes its default when absent.
    #[serde(default, rename = "type")]
    pub notification_type: Option<String>,
    /// Referenced object id.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Referenced object kind.
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Navigation target.
    #[serde(default)]
    pub action_url: Option<String>,
}

/// The per-recipient-independent part of a bulk send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkNotification {
    /// Title.
    pub title: String,
    /// Body.
    pub message: String,
    /// Type; the service substitutes its default when absent.
    #[serde(default, rename = "type")]
    pub notification_type: Option<String>,
    /// Referenced object id.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Referenced object kind.
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Navigation target.
    #[serde(default)]
    pub action_url: Option<String>,
}

impl BulkNotification {
    /// Address this notification to one recipient.
    pub fn for_user(&self, user_id: Uuid) -> NewNotification {
        NewNotification {
            user_id,
            title: self.title.clone(),
            message: self.message.clone(),
            notification_type: self.notification_type.clone(),
            reference_id: self.reference_id.clone(),
            reference_type: self.reference_type.clone(),
            action_url: self.action_url.clone(),
        }
    }
}
