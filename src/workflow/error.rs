//! Error types for the workflow orchestrator
//!
//! Only critical phases surface these; best-effort phases record their
//! failures inside their result substructure instead.

use crate::clients::ClientError;
use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for workflow operations
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The generation backend rejected the job
    #[error("Job creation failed: {0}")]
    JobCreation(String),

    /// The job never resolved within the polling budget
    #[error("Content generation timed out after {attempts} polls")]
    JobTimeout {
        /// Number of polls performed before giving up
        attempts: u32,
    },

    /// The generation backend reported the job failed
    #[error("{0}")]
    JobFailed(String),

    /// The job completed but its result was unusable
    #[error("Job completed without a result")]
    MissingResult,

    /// Content scoring failed in the enhancement phase
    #[error("Enhancement analysis failed: {0}")]
    Enhancement(String),

    /// A crawl, cluster, or scoring step failed in the interlinking phase
    #[error("Interlinking failed: {0}")]
    Interlinking(String),

    /// Collaborator client error in a critical phase
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

impl From<WorkflowError> for CrateError {
    fn from(err: WorkflowError) -> Self {
        CrateError::Workflow(err.to_string())
    }
}
