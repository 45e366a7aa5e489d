//! Request DTOs with validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use marketdesk_core::error::AppError;
use marketdesk_core::result::AppResult;
use marketdesk_entity::notification::{BulkNotification, NewNotification, NotificationFilters};
use marketdesk_entity::watchlist::NewWatchlistEntry;

/// Validate a request body, mapping failures to a validation error.
pub fn validated<T: Validate>(request: T) -> AppResult<T> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(request)
}

/// Create notification request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    /// Recipient.
    pub user_id: Uuid,
    /// Title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Body.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Notification type; defaults server-side.
    #[serde(rename = "type", default)]
    pub notification_type: Option<String>,
    /// Id of the referenced object, such as a stock symbol.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Kind of the referenced object.
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Link opened from the notification.
    #[serde(default)]
    pub action_url: Option<String>,
}

impl From<CreateNotificationRequest> for NewNotification {
    fn from(req: CreateNotificationRequest) -> Self {
        Self {
            user_id: req.user_id,
            title: req.title,
            message: req.message,
            notification_type: req.notification_type,
            reference_id: req.reference_id,
            reference_type: req.reference_type,
            action_url: req.action_url,
        }
    }
}

/// Bulk notification request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkNotificationRequest {
    /// Recipients, in send order.
    #[validate(length(min = 1, message = "At least one user id is required"))]
    pub user_ids: Vec<Uuid>,
    /// Title shared by every notification.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Body shared by every notification.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Notification type; defaults server-side.
    #[serde(rename = "type", default)]
    pub notification_type: Option<String>,
    /// Id of the referenced object.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Kind of the referenced object.
    #[serde(default)]
    pub reference_type: Option<String>,
    /// Link opened from the notification.
    #[serde(default)]
    pub action_url: Option<String>,
}

impl BulkNotificationRequest {
    /// Split into the recipient list and the shared payload.
    pub fn into_parts(self) -> (Vec<Uuid>, BulkNotification) {
        let data = BulkNotification {
            title: self.title,
            message: self.message,
            notification_type: self.notification_type,
            reference_id: self.reference_id,
            reference_type: self.reference_type,
            action_url: self.action_url,
        };
        (self.user_ids, data)
    }
}

/// Add to watchlist request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToWatchlistRequest {
    /// Owner of the watchlist.
    pub user_id: Uuid,
    /// Symbol to watch, matched exactly.
    #[validate(custom(function = "validate_stock_symbol"))]
    pub stock_symbol: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

const MAX_SYMBOL_LEN: usize = 32;

fn validate_stock_symbol(symbol: &str) -> Result<(), ValidationError> {
    if symbol.is_empty() {
        return Err(
            ValidationError::new("required").with_message("Stock symbol is required".into()),
        );
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(ValidationError::new("length").with_message(
            format!("Stock symbol must be at most {MAX_SYMBOL_LEN} characters").into(),
        ));
    }
    Ok(())
}

impl From<AddToWatchlistRequest> for NewWatchlistEntry {
    fn from(req: AddToWatchlistRequest) -> Self {
        Self {
            user_id: req.user_id,
            stock_symbol: req.stock_symbol,
            notes: req.notes,
        }
    }
}

/// Update watchlist notes request. A missing or null `notes` clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNotesRequest {
    /// Replacement notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Build listing filters from raw query-string pairs.
///
/// `limit` and `offset` must be non-negative integers. `true` and `false`
/// become booleans so they match stored flags such as `is_read`; every
/// other value is matched as a string.
pub fn notification_filters(params: HashMap<String, String>) -> AppResult<NotificationFilters> {
    let mut filters = NotificationFilters::default();
    for (key, raw) in params {
        match key.as_str() {
            "limit" => filters.limit = Some(parse_count(&key, &raw)?),
            "offset" => filters.offset = Some(parse_count(&key, &raw)?),
            _ => {
                let value = match raw.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => Value::String(raw),
                };
                filters.fields.insert(key, value);
            }
        }
    }
    Ok(filters)
}

fn parse_count(key: &str, raw: &str) -> AppResult<u64> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("`{key}` must be a non-negative integer")))
}
