//! Submission record domain types

use serde::{Deserialize, Serialize};

/// One homework submission as reported by the review API
///
/// Only `status` is required. Any other keys the API sends (`id`,
/// `reviewer_comment`, `date_updated`, ...) are ignored whatever their type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub status: String,
    #[serde(default)]
    pub homework_name: Option<String>,
}

impl SubmissionRecord {
    pub fn new(status: impl Into<String>, homework_name: Option<String>) -> Self {
        Self {
            status: status.into(),
            homework_name,
        }
    }
}
