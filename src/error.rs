//! Client Error Types
//!
//! Errors raised while talking to the File Hub API, plus extraction of a
//! human-readable message from the backend's `{ error?, detail? }` payloads.

use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorPayload {
    /// Best-effort message: `detail`, then `error`, then the fallback text.
    pub fn message(&self, fallback: &str) -> String {
        self.detail
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.error.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or(fallback)
            .to_string()
    }

    /// Parse a response body, tolerating bodies that are not JSON at all.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message("no details"))
    }
}

/// Errors that can occur in the API client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, timeout or other transport failure
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with an error status
    #[error("API error ({status}): {payload}")]
    Api { status: u16, payload: ErrorPayload },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// The record has no download locator (duplicate references may not)
    #[error("File '{0}' is not available for download")]
    NotDownloadable(String),

    /// Local file system error (reading an upload, writing a download)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Message suitable for inline display next to the triggering control.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(text) => text.clone(),
            ClientError::Api { status, payload } => {
                payload.message(&format!("Request failed with status {}", status))
            }
            ClientError::Decode(text) => format!("Unexpected response: {}", text),
            ClientError::NotDownloadable(name) => {
                format!("File '{}' is not available for download", name)
            }
            ClientError::Io(e) => e.to_string(),
        }
    }

    /// Build an API error from a status code and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ClientError::Api {
            status,
            payload: ErrorPayload::from_body(body),
        }
    }

    /// Whether the backend reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Api {
                status: status.as_u16(),
                payload: ErrorPayload::default(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefers_detail() {
        let payload = ErrorPayload::from_body(
            r#"{"error": "Failed to save file", "detail": "Unable to save file to storage."}"#,
        );
        assert_eq!(payload.message("boom"), "Unable to save file to storage.");
    }

    #[test]
    fn test_message_falls_back_to_error_then_transport() {
        let payload = ErrorPayload::from_body(r#"{"error": "No file provided"}"#);
        assert_eq!(payload.message("boom"), "No file provided");

        let payload = ErrorPayload::from_body("<html>502 Bad Gateway</html>");
        assert_eq!(payload.message("Network error"), "Network error");

        let payload = ErrorPayload::from_body(r#"{"detail": "  "}"#);
        assert_eq!(payload.message("fallback"), "fallback");
    }

    #[test]
    fn test_user_message() {
        let err = ClientError::from_response(400, r#"{"detail": "Must be an integer."}"#);
        assert_eq!(err.user_message(), "Must be an integer.");

        let err = ClientError::from_response(500, "");
        assert_eq!(err.user_message(), "Request failed with status 500");

        let err = ClientError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::from_response(404, r#"{"detail": "Not found."}"#);
        assert_eq!(err.to_string(), "API error (404): Not found.");
        assert!(err.is_not_found());
    }
}
