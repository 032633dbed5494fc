//! Statuses repository
//!
//! Fetches homework status changes from the review API.

use async_trait::async_trait;
use homework_client::{ApiResponse, ClientError, PracticumClient};

/// Repository trait for the review API
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Fetches status changes since `from_date`
    ///
    /// Issues exactly one request. Any transport, status, or decoding
    /// failure comes back as a [`ClientError`].
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp marking the start of the window
    async fn fetch_statuses(&self, from_date: i64) -> Result<ApiResponse, ClientError>;
}

#[async_trait]
impl StatusRepository for PracticumClient {
    async fn fetch_statuses(&self, from_date: i64) -> Result<ApiResponse, ClientError> {
        PracticumClient::fetch_statuses(self, from_date).await
    }
}
