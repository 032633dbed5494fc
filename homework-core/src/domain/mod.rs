//! Core domain types
//!
//! This module contains the structures exchanged with the review API.
//! They are shared between the client (which decodes responses) and the
//! bot (which validates and formats them).

pub mod homework;
pub mod response;

pub use homework::SubmissionRecord;
pub use response::ApiResponse;
