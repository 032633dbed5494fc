//! Homework HTTP Clients
//!
//! Type-safe HTTP clients for the two remote services the bot talks to:
//! - [`PracticumClient`]: the homework review status API
//! - [`TelegramClient`]: the Telegram Bot API used for notifications
//!
//! Both classify failures into [`ClientError`] instead of surfacing raw
//! transport errors.
//!
//! # Example
//!
//! ```no_run
//! use homework_client::PracticumClient;
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), homework_client::ClientError> {
//!     let client = PracticumClient::new(SecretString::from("token".to_string()));
//!
//!     let response = client.fetch_statuses(0).await?;
//!     println!("current_date: {:?}", response.current_date());
//!     Ok(())
//! }
//! ```

pub mod error;
mod telegram;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use homework_core::ApiResponse;
pub use telegram::{SentMessage, TELEGRAM_API_URL, TelegramClient};

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

use crate::error::RequestContext;

/// Homework review status endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Timeout applied by [`PracticumClient::new`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the homework review status API
///
/// Stateless: every call is a single GET with the OAuth credential and the
/// `from_date` window parameter.
#[derive(Debug)]
pub struct PracticumClient {
    /// Full URL of the statuses endpoint
    endpoint: String,
    /// OAuth token sent as `Authorization: OAuth <token>`
    token: SecretString,
    /// HTTP client instance
    client: Client,
}

impl PracticumClient {
    /// Create a client for the default endpoint
    ///
    /// # Arguments
    /// * `token` - OAuth token of the tracked account
    pub fn new(token: SecretString) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_client(DEFAULT_ENDPOINT, token, client)
    }

    /// Create a client with a custom endpoint and HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use homework_client::{DEFAULT_ENDPOINT, PracticumClient};
    /// use reqwest::Client;
    /// use secrecy::SecretString;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PracticumClient::with_client(
    ///     DEFAULT_ENDPOINT,
    ///     SecretString::from("token".to_string()),
    ///     http_client,
    /// );
    /// assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    /// ```
    pub fn with_client(endpoint: impl Into<String>, token: SecretString, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            token,
            client,
        }
    }

    /// Get the endpoint this client queries
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch status changes since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp marking the start of the window
    ///
    /// # Returns
    /// The decoded response body, not yet validated
    pub async fn fetch_statuses(&self, from_date: i64) -> Result<ApiResponse> {
        let ctx = RequestContext::new(&self.endpoint, format!("from_date={}", from_date));

        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(
                AUTHORIZATION,
                format!("OAuth {}", self.token.expose_secret()),
            )
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| ctx.request_failed(e))?;

        let body = self.handle_response(&ctx, response).await?;
        Ok(ApiResponse::new(body))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and decode the body as JSON
    async fn handle_response(
        &self,
        ctx: &RequestContext,
        response: reqwest::Response,
    ) -> Result<JsonValue> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ctx.api_error(status.as_u16(), error_text));
        }

        let text = response.text().await.map_err(|e| ctx.request_failed(e))?;

        serde_json::from_str(&text)
            .map_err(|e| ctx.parse_error(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_response, serve_once};

    fn client_for(endpoint: String) -> PracticumClient {
        PracticumClient::with_client(
            endpoint,
            SecretString::from("test-token".to_string()),
            Client::new(),
        )
    }

    #[test]
    fn test_client_creation() {
        let client = PracticumClient::new(SecretString::from("t".to_string()));
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let client = client_for("http://localhost/api/".to_string());
        assert!(!format!("{:?}", client).contains("test-token"));
    }

    #[tokio::test]
    async fn test_fetch_sends_window_and_credential() {
        let body = r#"{"homeworks":[{"status":"approved","homework_name":"proj1"}],"current_date":1000}"#;
        let (url, request) = serve_once(http_response(200, body)).await;

        let response = client_for(url).fetch_statuses(400).await.unwrap();
        assert_eq!(response.current_date(), Some(1000));

        let request = request.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /api/?from_date=400 "), "{request}");
        assert!(request.contains("authorization: oauth test-token"), "{request}");
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let (url, _request) = serve_once(http_response(500, "boom")).await;

        let err = client_for(url).fetch_statuses(0).await.unwrap_err();
        match &err {
            ClientError::ApiError {
                status,
                params,
                message,
                ..
            } => {
                assert_eq!(*status, 500);
                assert_eq!(params, "from_date=0");
                assert_eq!(message, "boom");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let (url, _request) = serve_once(http_response(200, "<html>oops</html>")).await;

        let err = client_for(url).fetch_statuses(0).await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind and drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{}/api/", addr))
            .fetch_statuses(0)
            .await
            .unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        assert!(!err.to_string().contains("test-token"));
    }
}
