//! Error types for collaborator clients

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for collaborator client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Response decoding error
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL construction error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<ClientError> for CrateError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => CrateError::Http(e),
            ClientError::Api {
                status_code,
                message,
            } => CrateError::Api {
                status_code,
                message,
            },
            _ => CrateError::Client(err.to_string()),
        }
    }
}
