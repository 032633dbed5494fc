//! Review verdicts
//!
//! Maps review status codes to the fixed text shown to the user and
//! builds the notification message for a submission record.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::SubmissionRecord;

/// Placeholder used when a record carries no `homework_name`
pub const UNKNOWN_HOMEWORK_NAME: &str = "unknown";

/// Status code to verdict text, in the order the API documents them
pub const VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// The status code as the API spells it
    pub fn code(self) -> &'static str {
        VERDICTS[self as usize].0
    }

    /// Human-readable verdict for this status
    pub fn verdict(self) -> &'static str {
        VERDICTS[self as usize].1
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HomeworkStatus {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(FormatError::UnknownStatus(other.to_string())),
        }
    }
}

/// Errors produced while turning a record into a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Status is not in the verdict table
    #[error("unknown homework status '{0}'")]
    UnknownStatus(String),
}

/// Builds the notification text for a submission record
///
/// An unknown status is an error: it means the API changed and an
/// operator should look. A missing name only degrades the message.
pub fn format_status(record: &SubmissionRecord) -> Result<String, FormatError> {
    let status: HomeworkStatus = record.status.parse()?;
    let name = record
        .homework_name
        .as_deref()
        .unwrap_or(UNKNOWN_HOMEWORK_NAME);

    Ok(format!(
        "Changed review status of \"{}\".{}",
        name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approved_message() {
        let record = SubmissionRecord::new("approved", Some("proj1".to_string()));
        assert_eq!(
            format_status(&record).unwrap(),
            "Changed review status of \"proj1\".Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_every_table_entry_formats() {
        for (code, verdict) in VERDICTS {
            let record = SubmissionRecord::new(code, Some("hw".to_string()));
            let message = format_status(&record).unwrap();
            assert!(message.ends_with(verdict), "{code}: {message}");
        }
    }

    #[test]
    fn test_status_round_trips_through_table() {
        for status in [
            HomeworkStatus::Approved,
            HomeworkStatus::Reviewing,
            HomeworkStatus::Rejected,
        ] {
            assert_eq!(status.code().parse::<HomeworkStatus>(), Ok(status));
            assert_eq!(status.to_string(), status.code());
        }
    }

    #[test]
    fn test_unknown_status_fails() {
        for code in ["", "APPROVED", "archived", "approved "] {
            let record = SubmissionRecord::new(code, Some("hw".to_string()));
            assert_eq!(
                format_status(&record),
                Err(FormatError::UnknownStatus(code.to_string()))
            );
        }
    }

    #[test]
    fn test_missing_name_uses_placeholder() {
        let record = SubmissionRecord::new("reviewing", None);
        assert_eq!(
            format_status(&record).unwrap(),
            "Changed review status of \"unknown\".Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let record = SubmissionRecord::new("rejected", Some("proj3".to_string()));
        assert_eq!(format_status(&record), format_status(&record));
    }
}
