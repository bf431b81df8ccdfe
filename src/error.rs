//! Error types for the pressroom crate

use thiserror::Error;

/// Result type for pressroom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pressroom operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Collaborator client error
    #[error("Client error: {0}")]
    Client(String),

    /// Site crawl error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Content scoring error
    #[error("Scoring error: {0}")]
    Scoring(String),

    /// Interlinking error
    #[error("Interlink error: {0}")]
    Interlink(String),

    /// Workflow execution error
    #[error("Workflow error: {0}")]
    Workflow(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
