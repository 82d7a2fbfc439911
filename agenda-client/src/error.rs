//! Client error types

use http::StatusCode;
use shared::ErrorBody;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401 from the backend; the session token has already been cleared
    #[error("Authentication required")]
    Unauthorized { body: Option<String> },

    /// Non-success status with the backend's body
    #[error("API error ({status})")]
    Api {
        status: StatusCode,
        body: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token storage error
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Failure classes surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network/transport failure
    Transport,
    /// 401: session cleared, user must log in again
    Authentication,
    /// 4xx with a message from the backend
    Validation,
    /// Anything else
    Unknown,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) => ErrorKind::Transport,
            Self::Unauthorized { .. } => ErrorKind::Authentication,
            Self::Api { status, .. } if status.is_client_error() => ErrorKind::Validation,
            _ => ErrorKind::Unknown,
        }
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { body } | Self::Api { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Message for a toast.
    ///
    /// Response body first: a JSON `msg`, then a JSON `error`, then a plain
    /// string body. Transport failures show their own text. Everything else
    /// falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(body) = self.body().map(str::trim).filter(|b| !b.is_empty()) {
            match serde_json::from_str::<serde_json::Value>(body) {
                Ok(serde_json::Value::String(text)) => return text,
                Ok(value @ serde_json::Value::Object(_)) => {
                    if let Ok(parsed) = serde_json::from_value::<ErrorBody>(value)
                        && let Some(message) = parsed.message()
                    {
                        return message.to_string();
                    }
                }
                Ok(_) => {}
                Err(_) => return body.to_string(),
            }
        }

        match self {
            Self::Http(e) => e.to_string(),
            _ => fallback.to_string(),
        }
    }
}
