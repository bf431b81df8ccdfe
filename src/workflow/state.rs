//! Workflow state
//!
//! One [`WorkflowState`] describes a single pipeline run: the current phase,
//! overall progress, and the result of every phase that has run so far. The
//! orchestrator is the only writer; observers receive immutable snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::{GeneratedImage, SeoHints};
use crate::interlink::LinkOpportunity;
use crate::scoring::ContentAnalysisResult;

/// Phase of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// Created, not yet started
    Idle,
    /// Phase 1: polling the content-generation job
    ContentGeneration,
    /// Phase 2: requesting images
    ImageGeneration,
    /// Phase 3: scoring and metadata derivation
    ContentEnhancement,
    /// Phase 4: crawl, cluster, and link application
    Interlinking,
    /// Phase 5: readiness gate
    PublishingPreparation,
    /// Terminal: every phase ran
    Completed,
    /// Terminal: a critical phase aborted the run
    Failed,
}

impl WorkflowPhase {
    /// Whether the run is over
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowPhase::Completed | WorkflowPhase::Failed)
    }
}

/// Outcome tag for a best-effort phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    /// The phase ran to completion
    Completed,
    /// The phase ran and failed; the run continued
    Failed,
    /// The phase was not applicable and did nothing
    Skipped,
}

/// Output of the content-generation phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentGenerationResult {
    /// HTML content body
    pub content: String,

    /// Article title
    pub title: String,

    /// Short excerpt, when the backend produced one
    pub excerpt: Option<String>,

    /// Word count reported by the backend
    pub word_count: usize,

    /// SEO hints from the generation backend
    pub seo: Option<SeoHints>,
}

/// Output of the image-generation phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationResult {
    /// Whether the phase completed, failed, or was skipped
    pub status: PhaseStatus,

    /// 16:9 featured image, when generated
    pub featured: Option<GeneratedImage>,

    /// 1:1 thumbnail, when generated
    pub thumbnail: Option<GeneratedImage>,

    /// Cause, when `status` is `Failed`
    pub error: Option<String>,
}

/// Output of the content-enhancement phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancementResult {
    /// Full scoring of the generated content
    pub analysis: ContentAnalysisResult,

    /// URL slug derived from the title
    pub slug: String,

    /// SEO title, reusing or extending the article title
    pub seo_title: String,

    /// Meta description derived from the content
    pub meta_description: String,

    /// schema.org Article object, when structured data was requested
    pub structured_data: Option<serde_json::Value>,
}

/// Output of the interlinking phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterlinkingResult {
    /// Whether the phase completed, failed, or was skipped
    pub status: PhaseStatus,

    /// Links that were woven into the content, in application order
    pub applied_links: Vec<LinkOpportunity>,

    /// Pages discovered by the crawl
    pub pages_crawled: usize,

    /// Topic clusters detected across the site
    pub cluster_count: usize,

    /// Cause, when `status` is `Failed`
    pub error: Option<String>,
}

impl InterlinkingResult {
    /// An empty result for a skipped phase
    pub fn skipped() -> Self {
        Self {
            status: PhaseStatus::Skipped,
            applied_links: Vec::new(),
            pages_crawled: 0,
            cluster_count: 0,
            error: None,
        }
    }
}

/// Output of the publishing-readiness gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// Whether every required field is present
    pub is_ready: bool,

    /// Weighted aggregate score in [0, 100]
    pub content_score: u8,

    /// Missing required fields; any entry makes the draft not ready
    pub issues: Vec<String>,

    /// Missing recommended fields and sub-threshold scores
    pub warnings: Vec<String>,

    /// Concrete improvements for low-scoring dimensions
    pub suggestions: Vec<String>,
}

/// Full state of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Run identifier
    pub id: Uuid,

    /// Current phase
    pub phase: WorkflowPhase,

    /// Overall progress, 0-100, non-decreasing within a run
    pub progress: u8,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the state last changed
    pub updated_at: DateTime<Utc>,

    /// Phase 1 output
    pub content: Option<ContentGenerationResult>,

    /// Phase 2 output
    pub images: Option<ImageGenerationResult>,

    /// Phase 3 output
    pub enhancement: Option<EnhancementResult>,

    /// Phase 4 output
    pub interlinking: Option<InterlinkingResult>,

    /// Phase 5 output
    pub readiness: Option<ReadinessReport>,

    /// Error message when `phase` is `Failed`
    pub error: Option<String>,
}

impl WorkflowState {
    /// A fresh idle state with a new run id
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phase: WorkflowPhase::Idle,
            progress: 0,
            started_at: now,
            updated_at: now,
            content: None,
            images: None,
            enhancement: None,
            interlinking: None,
            readiness: None,
            error: None,
        }
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serialization() {
        assert_eq!(
            serde_json::to_string(&WorkflowPhase::ContentGeneration).unwrap(),
            "\"content_generation\""
        );
        assert_eq!(
            serde_json::to_string(&WorkflowPhase::PublishingPreparation).unwrap(),
            "\"publishing_preparation\""
        );
    }

    #[test]
    fn test_terminal_phases() {
        assert!(WorkflowPhase::Completed.is_terminal());
        assert!(WorkflowPhase::Failed.is_terminal());
        assert!(!WorkflowPhase::Interlinking.is_terminal());
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = WorkflowState::new();
        assert_eq!(state.phase, WorkflowPhase::Idle);
        assert_eq!(state.progress, 0);
        assert!(state.error.is_none());
    }
}
