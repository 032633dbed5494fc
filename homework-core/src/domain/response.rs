//! Review API response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A decoded but not yet validated response from the review API
///
/// The body is kept as raw JSON so that shape problems are reported by
/// [`crate::validate`] rather than hidden by a failed deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(JsonValue);

impl ApiResponse {
    pub fn new(body: JsonValue) -> Self {
        Self(body)
    }

    /// The raw decoded body
    pub fn body(&self) -> &JsonValue {
        &self.0
    }

    /// Server-side timestamp to use as the start of the next window
    ///
    /// `None` if the field is absent or not an integer.
    pub fn current_date(&self) -> Option<i64> {
        self.0.get("current_date").and_then(JsonValue::as_i64)
    }
}

impl From<JsonValue> for ApiResponse {
    fn from(body: JsonValue) -> Self {
        Self::new(body)
    }
}
