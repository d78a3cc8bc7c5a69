//! Error handling for the Servio admin client

use std::fmt;
use thiserror::Error;

/// Unified error type for the admin client.
///
/// Maps the failure classes a caller has to distinguish: client-side
/// validation, authentication failures (which force a logout), missing
/// records, server-reported errors, and plain transport failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP transport errors
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication errors (bad credentials, expired token, 401)
    #[error("authentication error: {0}")]
    Auth(String),

    /// The requested record does not exist (404 on a detail fetch)
    #[error("not found: {0}")]
    NotFound(String),

    /// Non-2xx response with a server-provided message
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Client-side validation failure, scoped to a form field
    #[error("validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    /// Configuration errors (bad base URL, missing settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new not-found error
    pub fn not_found<T: fmt::Display>(msg: T) -> Self {
        Error::NotFound(msg.to_string())
    }

    /// Create a new server error
    pub fn server<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Server {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: fmt::Display, M: fmt::Display>(field: F, msg: M) -> Self {
        Error::Validation {
            field: field.to_string(),
            message: msg.to_string(),
        }
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Whether this error should terminate the session (expired/invalid token).
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// The message to surface to the user: the server's own message where
    /// one exists, otherwise a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Error::Server { message, .. } if !message.is_empty() => message.clone(),
            Error::Auth(msg) if !msg.is_empty() => msg.clone(),
            Error::NotFound(_) => "Not found.".to_string(),
            Error::Validation { field, message } => format!("{}: {}", field, message),
            _ => "Network error".to_string(),
        }
    }
}
