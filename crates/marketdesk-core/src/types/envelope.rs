//! The uniform response envelope returned by every controller method.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// `{success, data?, count?, message?, error?, code?}`.
///
/// `success` is the only failure signal. `code` carries the typed error kind
/// on failure so callers need not match on `error` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Item count for list and count operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Human-readable success message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Human-readable failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorKind>,
}

impl<T> Envelope<T> {
    /// A successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
            error: None,
            code: None,
        }
    }

    /// A successful envelope with no payload.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            count: None,
            message: Some(message.into()),
            error: None,
            code: None,
        }
    }

    /// A failed envelope built from an error.
    pub fn fail(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message: None,
            error: Some(err.message.clone()),
            code: Some(err.kind),
        }
    }

    /// Attach a success message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a count.
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

impl<T> From<Result<T, AppError>> for Envelope<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_omits_failure_fields() {
        let envelope = Envelope::ok(vec![1, 2]).with_count(2);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, json!({"success": true, "data": [1, 2], "count": 2}));
    }

    #[test]
    fn test_failure_carries_message_and_code() {
        let envelope: Envelope<()> = Envelope::fail(&AppError::not_found("Stock not found in watchlist"));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            json!({"success": false, "error": "Stock not found in watchlist", "code": "NOT_FOUND"})
        );
    }
}
