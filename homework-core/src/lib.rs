//! Homework Core
//!
//! Core types and rules for the homework review status bot.
//!
//! This crate contains:
//! - Domain types: the review API response and its submission records
//! - Validation: shape checks on a decoded API response
//! - Verdicts: status codes and the messages derived from them
//! - Dedup log: the record of messages already delivered
//!
//! Nothing here performs I/O; transport lives in `homework-client` and
//! the polling loop in `homework-bot`.

pub mod domain;
pub mod sent_log;
pub mod validate;
pub mod verdict;

pub use domain::{ApiResponse, SubmissionRecord};
pub use sent_log::SentMessageLog;
pub use validate::{ValidationError, latest_record, validate};
pub use verdict::{FormatError, HomeworkStatus, format_status};
