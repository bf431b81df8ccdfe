//! # Pressroom - Content Enrichment Pipeline for Rust
//!
//! This crate generates long-form articles through an external job queue and
//! enriches them into publishable drafts: images, SEO metadata, internal and
//! external hyperlinks, and a publishing-readiness gate. The pipeline runs as
//! five sequential phases over slow, unreliable services, with per-phase
//! failure isolation so a missing image or missing links never blocks
//! publication while missing content always does.
//!
//! ## Features
//!
//! - Five-phase workflow orchestrator with a single 0-100 progress bar
//! - Bounded polling of asynchronous content-generation jobs
//! - Site crawling over a CMS-like collection API with failure isolation
//! - Frequency-based keyword/topic indexing of crawled pages
//! - Pillar/supporting/long-tail topic clustering with authority scores
//! - Relevance-scored internal link recommendation with an optional deep pass
//! - Curated external authority/citation/resource link discovery
//! - Deterministic readability, SEO, and quality scoring
//! - Async API with Tokio; state snapshots observable over a watch channel
//!
//! ## Example
//!
//! ```rust,no_run
//! use pressroom::clients::mock::{MockImageClient, MockJobClient, MockSiteRepository};
//! use pressroom::clients::GeneratedArticle;
//! use pressroom::workflow::{Orchestrator, WorkflowConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let article = GeneratedArticle {
//!         content: "<h1>Hello</h1><p>A short draft.</p>".to_string(),
//!         title: "Hello".to_string(),
//!         excerpt: None,
//!         word_count: 5,
//!         seo: None,
//!     };
//!     let orchestrator = Orchestrator::new(
//!         MockJobClient::completes_with(article, 1),
//!         MockImageClient::returning_images(),
//!         MockSiteRepository::new(),
//!     );
//!
//!     let config = WorkflowConfig::builder()
//!         .topic("Hello World")
//!         .keywords(vec!["hello".to_string()])
//!         .build();
//!     let state = orchestrator.execute(&config).await;
//!
//!     println!("{:?}: {}%", state.phase, state.progress);
//!     Ok(())
//! }
//! ```

mod error;
pub mod text;

// Pipeline modules
pub mod clients;
pub mod clusters;
pub mod crawler;
pub mod index;
pub mod interlink;
pub mod scoring;
pub mod workflow;

pub use error::Error;
pub use error::Result;

/// Re-export of the most commonly used types
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::scoring::{AnalyzeRequest, ContentAnalysisResult, analyze};
    pub use crate::workflow::{
        Orchestrator, WorkflowConfig, WorkflowPhase, WorkflowState,
    };
}
