//! Error types for the homework clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the review API or the messenger
///
/// Every request-level variant carries the endpoint and parameters that
/// were used, so a logged error is enough to reproduce the call.
/// Credentials never appear in either.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failed (timeout, DNS, connection refused, body read)
    #[error("request to {endpoint} ({params}) failed: {source}")]
    RequestFailed {
        endpoint: String,
        params: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status or refused the request
    #[error("{endpoint} ({params}) returned status {status}: {message}")]
    ApiError {
        endpoint: String,
        params: String,
        /// HTTP status code
        status: u16,
        /// Error text from the server
        message: String,
    },

    /// Body could not be decoded as JSON
    #[error("failed to decode response from {endpoint} ({params}): {message}")]
    ParseError {
        endpoint: String,
        params: String,
        message: String,
    },

    /// Messenger credential is not well-formed
    #[error("invalid bot token: {0}")]
    InvalidToken(String),
}

impl ClientError {
    /// HTTP status of the failed call, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }

    /// Check if the request never got an answer (timeout, connect failure)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }
}

/// Endpoint and parameters of one call, used to build errors
#[derive(Debug, Clone)]
pub(crate) struct RequestContext {
    endpoint: String,
    params: String,
}

impl RequestContext {
    pub(crate) fn new(endpoint: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: params.into(),
        }
    }

    pub(crate) fn request_failed(&self, source: reqwest::Error) -> ClientError {
        ClientError::RequestFailed {
            endpoint: self.endpoint.clone(),
            params: self.params.clone(),
            // reqwest includes the URL in its message; the messenger URL embeds the token
            source: source.without_url(),
        }
    }

    pub(crate) fn api_error(&self, status: u16, message: impl Into<String>) -> ClientError {
        ClientError::ApiError {
            endpoint: self.endpoint.clone(),
            params: self.params.clone(),
            status,
            message: message.into(),
        }
    }

    pub(crate) fn parse_error(&self, message: impl Into<String>) -> ClientError {
        ClientError::ParseError {
            endpoint: self.endpoint.clone(),
            params: self.params.clone(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        let ctx = RequestContext::new("https://example.test/api/", "from_date=0");

        let server = ctx.api_error(503, "unavailable");
        assert_eq!(server.status(), Some(503));
        assert!(server.is_server_error());
        assert!(!server.is_client_error());
        assert!(!server.is_transport());

        let client = ctx.api_error(401, "bad token");
        assert!(client.is_client_error());
        assert!(!client.is_server_error());
    }

    #[test]
    fn test_error_message_carries_context() {
        let ctx = RequestContext::new("https://example.test/api/", "from_date=42");
        let message = ctx.parse_error("expected value at line 1").to_string();

        assert!(message.contains("https://example.test/api/"));
        assert!(message.contains("from_date=42"));
        assert!(message.contains("expected value"));
    }
}
