//! Telegram Bot API client
//!
//! Only the `sendMessage` method is used. The bot token is part of the
//! request URL, so errors and logs name the method with the token masked.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, RequestContext, Result};

/// Base URL of the Telegram Bot API
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct TelegramApiResponse<T> {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    result: Option<T>,
}

/// Result of a successful `sendMessage`
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// HTTP client for the Telegram Bot API
#[derive(Debug)]
pub struct TelegramClient {
    base_url: String,
    token: SecretString,
    client: Client,
}

impl TelegramClient {
    /// Create a client for the public Bot API
    ///
    /// Fails if the token is not of the form `<bot id>:<secret>`.
    pub fn new(token: SecretString) -> Result<Self> {
        let client = Client::builder()
            .timeout(crate::DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_client(TELEGRAM_API_URL, token, client)
    }

    /// Create a client with a custom base URL and HTTP client
    pub fn with_client(base_url: impl Into<String>, token: SecretString, client: Client) -> Result<Self> {
        validate_token(token.expose_secret())?;

        let base_url = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// Get the base URL of the Bot API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a plain text message to a chat
    ///
    /// # Arguments
    /// * `chat_id` - Numeric chat id or `@channelusername`
    /// * `text` - Message text
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<SentMessage> {
        let ctx = RequestContext::new(
            format!("{}/bot<redacted>/sendMessage", self.base_url),
            format!("chat_id={}", chat_id),
        );
        let url = format!(
            "{}/bot{}/sendMessage",
            self.base_url,
            self.token.expose_secret()
        );

        debug!(chat_id, "Sending Telegram message");

        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| ctx.request_failed(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ctx.request_failed(e))?;

        // Bot API errors come with a JSON body describing the failure
        let parsed = serde_json::from_str::<TelegramApiResponse<SentMessage>>(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.description)
                .unwrap_or(body);
            return Err(ctx.api_error(status.as_u16(), message));
        }

        let parsed = parsed
            .map_err(|e| ctx.parse_error(format!("Failed to parse Telegram response: {}", e)))?;

        if !parsed.ok {
            return Err(ctx.api_error(
                status.as_u16(),
                parsed.description.unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        parsed
            .result
            .ok_or_else(|| ctx.parse_error("Telegram response has no result"))
    }
}

/// Checks the `<bot id>:<secret>` shape of a bot token
fn validate_token(token: &str) -> Result<()> {
    let (bot_id, secret) = token
        .split_once(':')
        .ok_or_else(|| ClientError::InvalidToken("missing ':' separator".to_string()))?;

    if bot_id.is_empty() || !bot_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientError::InvalidToken(
            "bot id must be numeric".to_string(),
        ));
    }

    if secret.is_empty()
        || !secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ClientError::InvalidToken(
            "secret part is empty or has invalid characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_response, serve_once};

    const TOKEN: &str = "123456:ABC-def_ghi";

    fn client_for(base_url: String) -> TelegramClient {
        TelegramClient::with_client(base_url, SecretString::from(TOKEN.to_string()), Client::new())
            .unwrap()
    }

    #[test]
    fn test_token_validation() {
        assert!(validate_token(TOKEN).is_ok());
        assert!(validate_token("").is_err());
        assert!(validate_token("no-separator").is_err());
        assert!(validate_token("abc:secret").is_err());
        assert!(validate_token("123:").is_err());
        assert!(validate_token("123:sec ret").is_err());
    }

    #[test]
    fn test_new_rejects_malformed_token() {
        let result = TelegramClient::new(SecretString::from("not a token".to_string()));
        assert!(matches!(result, Err(ClientError::InvalidToken(_))));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = client_for("http://localhost:8080/".to_string());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_send_message() {
        let (url, request) =
            serve_once(http_response(200, r#"{"ok":true,"result":{"message_id":7}}"#)).await;

        let sent = client_for(url).send_message("42", "hello").await.unwrap();
        assert_eq!(sent.message_id, 7);

        let request = request.await.unwrap();
        assert!(request.starts_with(&format!("POST /api/bot{}/sendMessage ", TOKEN)));
        assert!(request.contains(r#""chat_id":"42""#), "{request}");
        assert!(request.contains(r#""text":"hello""#), "{request}");
    }

    #[tokio::test]
    async fn test_rejected_request_reports_description() {
        let (url, _request) = serve_once(http_response(
            400,
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        ))
        .await;

        let err = client_for(url).send_message("42", "hello").await.unwrap_err();
        let message = err.to_string();

        assert_eq!(err.status(), Some(400));
        assert!(message.contains("chat not found"), "{message}");
        assert!(!message.contains(TOKEN), "{message}");
    }

    #[tokio::test]
    async fn test_not_ok_with_success_status() {
        let (url, _request) =
            serve_once(http_response(200, r#"{"ok":false,"description":"nope"}"#)).await;

        let err = client_for(url).send_message("42", "hello").await.unwrap_err();
        assert!(matches!(err, ClientError::ApiError { ref message, .. } if message == "nope"));
    }
}
