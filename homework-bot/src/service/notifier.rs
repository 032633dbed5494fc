//! Notifier service
//!
//! Delivers messages to the user's chat. Delivery is best effort: a
//! failure is logged and swallowed so the poll loop keeps running.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::repository::MessageRepository;

/// Service trait for user notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers a message
    ///
    /// Never fails from the caller's point of view.
    async fn notify(&self, message: &str);
}

/// Notifier that posts to a fixed Telegram chat
pub struct TelegramNotifier {
    repository: Arc<dyn MessageRepository>,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a new Telegram notifier
    ///
    /// # Arguments
    /// * `repository` - Messaging transport
    /// * `chat_id` - Chat that receives every message
    pub fn new(repository: Arc<dyn MessageRepository>, chat_id: impl Into<String>) -> Self {
        Self {
            repository,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) {
        info!(chat_id = %self.chat_id, "Sending notification");

        match self.repository.send_message(&self.chat_id, message).await {
            Ok(()) => debug!(chat_id = %self.chat_id, "Notification delivered"),
            Err(e) => error!(chat_id = %self.chat_id, "Failed to send notification: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homework_client::ClientError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRepository {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl MessageRepository for RecordingRepository {
        async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), ClientError> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));

            if self.fail {
                return Err(ClientError::InvalidToken("rejected".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_notify_sends_to_configured_chat() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = TelegramNotifier::new(repository.clone(), "42");

        notifier.notify("hello").await;

        let sent = repository.sent.lock().unwrap();
        assert_eq!(*sent, vec![("42".to_string(), "hello".to_string())]);
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let repository = Arc::new(RecordingRepository {
            fail: true,
            ..Default::default()
        });
        let notifier = TelegramNotifier::new(repository.clone(), "42");

        // Must return normally even though the transport failed
        notifier.notify("hello").await;

        assert_eq!(repository.sent.lock().unwrap().len(), 1);
    }
}
