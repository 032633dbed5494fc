//! Messages repository
//!
//! Delivers text messages through the Telegram Bot API.

use async_trait::async_trait;
use homework_client::{ClientError, TelegramClient};

/// Repository trait for the messaging channel
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Sends a text message to a chat
    ///
    /// # Arguments
    /// * `chat_id` - Destination chat
    /// * `text` - Message text
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl MessageRepository for TelegramClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), ClientError> {
        TelegramClient::send_message(self, chat_id, text)
            .await
            .map(|_| ())
    }
}
