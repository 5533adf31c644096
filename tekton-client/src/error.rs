//! Error types for the Tekton pipeline client

use serde::Deserialize;
use tekton_core::validation::ValidationError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Tekton pipeline client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
        /// Trace ID reported by the service, for support requests
        trace: Option<String>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Failed to encode a request body
    #[error("Failed to encode request body: {0}")]
    EncodeError(#[from] serde_json::Error),

    /// Options failed client-side validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Credentials could not be applied to the request
    #[error("Authentication failed: {0}")]
    Auth(String),
}

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    trace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
            trace: None,
        }
    }

    /// Create an API error from a raw error body
    ///
    /// Messages of the service's `{"errors": [...], "trace": ...}` envelope are
    /// joined; any other body is used verbatim.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
            return Self::api_error(status, body.trim());
        };

        let messages: Vec<String> = envelope
            .errors
            .iter()
            .filter_map(|detail| match (&detail.code, &detail.message) {
                (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
                (None, Some(message)) => Some(message.clone()),
                (Some(code), None) => Some(code.clone()),
                (None, None) => None,
            })
            .collect();

        let message = if messages.is_empty() {
            body.trim().to_string()
        } else {
            messages.join("; ")
        };

        Self::ApiError {
            status,
            message,
            trace: envelope.trace,
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }

    /// Check if the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestFailed(err) if err.is_timeout())
    }
}
