//! Error types for the scoring module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for scoring operations
#[derive(Debug, Error)]
pub enum ScoreError {
    /// HTML parsing error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<ScoreError> for CrateError {
    fn from(err: ScoreError) -> Self {
        CrateError::Scoring(err.to_string())
    }
}
