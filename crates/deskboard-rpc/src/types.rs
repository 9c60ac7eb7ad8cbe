//! Wire-format types for the board endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Incoming board request: `{action, data}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Action name (e.g. `createTask`).
    pub action: String,
    /// Action-specific payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Outgoing board response: `{status, data?, message?}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Result payload (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Human-readable error message (present on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    /// Build a success response.
    pub fn success(data: Value) -> Self {
        Self {
            status: "success".into(),
            data: Some(data),
            message: None,
        }
    }

    /// Build an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            data: None,
            message: Some(message.into()),
        }
    }
}
