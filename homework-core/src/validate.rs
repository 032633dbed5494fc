//! Response validation
//!
//! Checks a decoded [`ApiResponse`] against the documented shape and
//! decodes the newest submission record. An empty `homeworks` array is a valid
//! response: it means nothing changed inside the requested window.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::{ApiResponse, SubmissionRecord};

const HOMEWORKS_FIELD: &str = "homeworks";

/// Ways a decoded response can fail to match the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Top-level body is not a JSON object
    #[error("response is not a mapping (got {found})")]
    ShapeMismatch { found: &'static str },

    /// A required key is absent
    #[error("response has no '{0}' key")]
    MissingField(&'static str),

    /// A key is present with the wrong JSON type
    #[error("'{field}' must be {expected} (got {found})")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// An entry of `homeworks` is not a usable submission record
    #[error("homework record #{index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

/// Validates the response and returns its entries in API order
///
/// Only the envelope is checked here; entries are returned untouched.
/// The API lists submissions most recent first, so index 0 is the one
/// whose status changed last.
pub fn validate(response: &ApiResponse) -> Result<Vec<JsonValue>, ValidationError> {
    let body = response.body();

    let object = body.as_object().ok_or(ValidationError::ShapeMismatch {
        found: json_type_name(body),
    })?;

    let homeworks = object
        .get(HOMEWORKS_FIELD)
        .ok_or(ValidationError::MissingField(HOMEWORKS_FIELD))?;

    let entries = homeworks
        .as_array()
        .ok_or(ValidationError::TypeMismatch {
            field: HOMEWORKS_FIELD,
            expected: "an array",
            found: json_type_name(homeworks),
        })?;

    Ok(entries.clone())
}

/// Decodes the newest entry, if any
///
/// Older entries are never looked at, so their contents cannot block a
/// cycle.
pub fn latest_record(entries: &[JsonValue]) -> Result<Option<SubmissionRecord>, ValidationError> {
    entries
        .first()
        .map(|entry| {
            decode_record(entry).map_err(|reason| ValidationError::MalformedRecord {
                index: 0,
                reason,
            })
        })
        .transpose()
}

fn decode_record(entry: &JsonValue) -> Result<SubmissionRecord, String> {
    if !entry.is_object() {
        return Err(format!("expected an object, got {}", json_type_name(entry)));
    }
    SubmissionRecord::deserialize(entry).map_err(|e| e.to_string())
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
