//! Error types for the docstore client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// A custom transport failed before producing a response.
    #[error("Transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Decode error: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request body serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP request failed before a complete response was read.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an upstream error with status code.
    pub fn upstream(message: impl Into<String>, status: u16) -> Self {
        Self::Upstream {
            message: message.into(),
            status,
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status reported by the API, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if retrying the same call could succeed.
    ///
    /// The client never retries; this is a hint for callers.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Request(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
            Self::Upstream { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Get the error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Transport { .. } => "transport",
            Self::Upstream { .. } => "upstream",
            Self::Decode { .. } => "decode",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Request(_) => "request",
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Error envelope returned by the API on failure.
///
/// ```text
/// { "error": { "code": 403, "message": "Missing or insufficient permissions.",
///              "status": "PERMISSION_DENIED" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Details of an [`ApiErrorBody`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// HTTP status code.
    #[serde(default)]
    pub code: u16,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Canonical status name, e.g. `NOT_FOUND`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApiErrorBody {
    /// Parses an error envelope, returning `None` for anything else.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error.status {
            Some(status) => write!(f, "[{status}] {}", self.error.message),
            None => f.write_str(&self.error.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = ClientError::config("project_id is required");
        assert_eq!(err.category(), "config");
        assert_eq!(err.status_code(), None);

        let err = ClientError::upstream("denied", 403);
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.category(), "upstream");

        let err = ClientError::decode("not an array");
        assert_eq!(err.category(), "decode");
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::upstream("[NOT_FOUND] database not found", 404);
        assert_eq!(err.to_string(), "Upstream error (404): [NOT_FOUND] database not found");

        let err = ClientError::transport("connection refused");
        assert!(err.to_string().contains("Transport error"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(ClientError::transport("reset").is_recoverable());
        assert!(ClientError::upstream("busy", 503).is_recoverable());
        assert!(ClientError::upstream("slow down", 429).is_recoverable());
        assert!(!ClientError::upstream("denied", 403).is_recoverable());
        assert!(!ClientError::config("bad").is_recoverable());
        assert!(!ClientError::decode("bad").is_recoverable());
    }

    #[test]
    fn test_io_error_from() {
        let err: ClientError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), "io");
        assert_eq!(err.status_code(), None);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_api_error_body() {
        let body = br#"{"error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
        let parsed = ApiErrorBody::parse(body).unwrap();

        assert_eq!(parsed.error.code, 403);
        assert_eq!(
            parsed.to_string(),
            "[PERMISSION_DENIED] Missing or insufficient permissions."
        );

        assert!(ApiErrorBody::parse(b"<html>Bad Gateway</html>").is_none());
    }
}
