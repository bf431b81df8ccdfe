//! Error types for the crawler module

use crate::clients::ClientError;
use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Collaborator client error
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// A collection item is missing a usable field
    #[error("Item {item_id} is missing a usable '{field}' field")]
    MissingField {
        /// The malformed item
        item_id: String,
        /// The field no candidate name matched
        field: &'static str,
    },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::Client(e) => e.into(),
            _ => CrateError::Crawl(err.to_string()),
        }
    }
}
