//! Error types for the interlinking module

use crate::clients::ClientError;
use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for interlinking operations
#[derive(Debug, Error)]
pub enum InterlinkError {
    /// Collaborator client error
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<InterlinkError> for CrateError {
    fn from(err: InterlinkError) -> Self {
        CrateError::Interlink(err.to_string())
    }
}
