//! Error types for the cloudlib library.

use thiserror::Error;

/// Message used when the server gives no usable error body.
pub const FALLBACK_MESSAGE: &str = "Something went wrong.";

/// Main error type for cloudlib operations.
///
/// A failed remote call is either [`CloudError::Unauthorized`] or a domain
/// failure. Domain failures are [`CloudError::Api`] plus the transport and
/// parse variants, which carry no server message; use
/// [`CloudError::is_domain`] rather than matching on `Api` alone.
#[derive(Error, Debug)]
pub enum CloudError {
    /// The session is no longer valid. Shared client state has already been
    /// reset when this is returned.
    #[error("Unauthorized")]
    Unauthorized,

    /// The server rejected the request with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Local filesystem error (uploads from disk, downloads to disk).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// A base URL or endpoint could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl CloudError {
    /// Whether this error means the session was lost.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CloudError::Unauthorized)
    }

    /// Whether this is a failed remote call other than session loss.
    ///
    /// Transport and parse failures count, and show the fallback message.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            CloudError::Api { .. }
                | CloudError::RequestError(_)
                | CloudError::JsonError(_)
                | CloudError::InvalidResponse(_)
        )
    }

    /// HTTP status attached to the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            CloudError::Unauthorized => Some(401),
            CloudError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to a user.
    ///
    /// Server-provided messages are passed through; transport and parse
    /// failures collapse into [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            CloudError::Unauthorized => "Your session has expired.".to_string(),
            CloudError::Api { message, .. } => message.clone(),
            CloudError::Custom(message) => message.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Result type alias for cloudlib operations.
pub type Result<T> = std::result::Result<T, CloudError>;
