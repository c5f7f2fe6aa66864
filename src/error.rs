//! Error types for canvas-mcp
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Every variant belongs to exactly one [`ErrorKind`], which is what the
//! dispatcher and the protocol layer use to decide how a failure is reported.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad or missing caller input; never reaches the network
    Validation,
    /// No response was received from the remote API
    Transport,
    /// The remote API answered with a non-2xx status
    RemoteApi,
    /// Dispatch routing miss (unknown operation or resource type)
    Routing,
    /// Anything else (configuration, decoding, I/O)
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::RemoteApi => "remote-api",
            Self::Routing => "routing",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// The main error type for canvas-mcp
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Invalid resource URI: {uri}")]
    InvalidResourceUri { uri: String },

    // ============================================================================
    // Routing Errors
    // ============================================================================
    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Unknown resource type: {resource_type}")]
    UnknownResourceType { resource_type: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Pagination aborted after {pages} pages: {reason}")]
    PaginationLimit { pages: u32, reason: String },

    // ============================================================================
    // Remote API Errors
    // ============================================================================
    #[error("Canvas API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_config(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a remote API error from a status code and the raw response body.
    ///
    /// The message is the body's `message` field when present, otherwise the
    /// body itself (serialized JSON, or the raw text if it was not JSON).
    pub fn api(status: u16, raw_body: &str) -> Self {
        let body: Option<Value> = serde_json::from_str(raw_body).ok();
        let message = match &body {
            Some(Value::Object(map)) => match map.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(other) if !other.is_null() => other.to_string(),
                _ => Value::Object(map.clone()).to_string(),
            },
            Some(other) => other.to_string(),
            None => raw_body.to_string(),
        };
        Self::Api {
            status,
            message,
            body,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField { .. }
            | Error::Validation { .. }
            | Error::InvalidResourceUri { .. } => ErrorKind::Validation,
            Error::UnknownOperation { .. } | Error::UnknownResourceType { .. } => {
                ErrorKind::Routing
            }
            Error::Http(_) | Error::Timeout { .. } | Error::PaginationLimit { .. } => {
                ErrorKind::Transport
            }
            Error::Api { .. } => ErrorKind::RemoteApi,
            _ => ErrorKind::Unknown,
        }
    }

    /// HTTP status code carried by a remote API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw remote payload carried by a remote API error
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for canvas-mcp
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::missing_field("course_id");
        assert_eq!(err.to_string(), "Missing required field: course_id");

        let err = Error::UnknownOperation {
            name: "canvas_fly".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown operation: canvas_fly");

        let err = Error::api(404, r#"{"message":"not found"}"#);
        assert_eq!(err.to_string(), "Canvas API error (404): not found");
    }

    #[test]
    fn test_api_error_prefers_message_field() {
        let err = Error::api(401, r#"{"message":"Invalid access token.","code":"x"}"#);
        match err {
            Error::Api {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid access token.");
                assert_eq!(body, Some(json!({"message": "Invalid access token.", "code": "x"})));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_serialized_body() {
        let err = Error::api(400, r#"{"errors":[{"message":"bad"}]}"#);
        assert!(err.to_string().contains(r#"{"errors":[{"message":"bad"}]}"#));
        assert!(err.payload().is_some());

        let err = Error::api(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Canvas API error (502): Bad Gateway");
        assert!(err.payload().is_none());
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::missing_field("x").kind(), ErrorKind::Validation);
        assert_eq!(Error::validation("bad").kind(), ErrorKind::Validation);
        assert_eq!(
            Error::UnknownResourceType {
                resource_type: "x".to_string()
            }
            .kind(),
            ErrorKind::Routing
        );
        assert_eq!(Error::api(500, "").kind(), ErrorKind::RemoteApi);
        assert_eq!(Error::Timeout { timeout_ms: 10 }.kind(), ErrorKind::Transport);
        assert_eq!(
            Error::PaginationLimit {
                pages: 3,
                reason: "too many".to_string()
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(Error::config("x").kind(), ErrorKind::Unknown);
        assert_eq!(ErrorKind::RemoteApi.to_string(), "remote-api");
    }

    #[test]
    fn test_status_and_payload() {
        let err = Error::api(404, r#"{"message":"not found"}"#);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.payload(), Some(&json!({"message": "not found"})));
        assert_eq!(Error::validation("x").status(), None);
    }

    #[test]
    fn test_is_retryable_status() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status), "{status}");
        }
        for status in [400, 401, 403, 404, 422, 501] {
            assert!(!is_retryable_status(status), "{status}");
        }
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
