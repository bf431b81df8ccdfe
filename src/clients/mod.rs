//! Collaborator clients for the pipeline
//!
//! This module defines the trait boundary to the external services the
//! pipeline consumes: the asynchronous content-generation job queue, the
//! image-generation service, and the site content repository the crawler
//! reads. A reqwest-backed implementation lives in [`http`], and mock
//! implementations for tests and dry runs live in [`mock`].

mod error;
pub mod http;
pub mod mock;

pub use error::ClientError;
pub use http::ApiClient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A request to generate one article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Topic to write about
    pub topic: String,

    /// Keywords the article should target
    pub keywords: Vec<String>,

    /// Intended audience description
    pub target_audience: String,

    /// Writing tone (e.g. "professional", "casual")
    pub tone: String,

    /// Requested article length in words
    pub word_count: u32,

    /// Generation quality tier
    pub quality_level: String,
}

/// Identifier of a submitted generation job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobHandle {
    /// Job identifier used for polling
    pub job_id: String,

    /// Backend queue the job landed in, when reported
    pub queue_id: Option<String>,
}

/// Lifecycle state of a generation job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Accepted but not yet started
    Pending,
    /// Being generated
    Processing,
    /// Finished with a result
    Completed,
    /// Finished with an error
    Failed,
}

/// One poll observation of a generation job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Current lifecycle state
    pub state: JobState,

    /// Backend-reported progress percentage
    #[serde(default)]
    pub progress: u8,

    /// The generated article, present once `state` is `Completed`
    pub result: Option<GeneratedArticle>,

    /// Backend error message, present once `state` is `Failed`
    pub error_message: Option<String>,
}

/// The article produced by a completed generation job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArticle {
    /// HTML content body
    pub content: String,

    /// Article title
    pub title: String,

    /// Short excerpt, when the backend produced one
    pub excerpt: Option<String>,

    /// Word count reported by the backend
    pub word_count: usize,

    /// SEO hints produced alongside the article
    pub seo: Option<SeoHints>,
}

/// SEO metadata a generation backend may produce with an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoHints {
    /// Suggested meta title
    pub meta_title: Option<String>,

    /// Suggested meta description
    pub meta_description: Option<String>,

    /// Suggested keywords
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Role an image plays on the published page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    /// 16:9 hero image
    Featured,
    /// 1:1 listing thumbnail
    Thumbnail,
}

/// A request to generate one image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Topic the image should illustrate
    pub topic: String,

    /// Keywords to inform the image prompt
    pub keywords: Vec<String>,

    /// Visual style hint
    pub style: Option<String>,

    /// Requested width in pixels
    pub width: u32,

    /// Requested height in pixels
    pub height: u32,

    /// Role the image plays on the page
    pub role: ImageRole,
}

/// A generated image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Image identifier at the image service
    pub image_id: String,

    /// Public URL of the image
    pub image_url: String,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Image format (e.g. "webp")
    pub format: String,
}

/// One collection exposed by a site content repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection identifier
    pub id: String,

    /// Display name
    pub name: String,
}

/// One item within a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Item identifier
    pub id: String,

    /// URL slug, when published
    pub slug: Option<String>,

    /// Raw field map; field names vary by collection schema
    pub field_data: serde_json::Value,

    /// Publication timestamp
    pub published_on: Option<DateTime<Utc>>,

    /// Last update timestamp
    pub last_updated: Option<DateTime<Utc>>,
}

/// One page of collection items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPage {
    /// Items in this page
    pub items: Vec<CollectionItem>,

    /// Total items in the collection
    pub total: usize,
}

/// Client for the asynchronous content-generation job queue
pub trait ContentJobClient: Send + Sync {
    /// Submit a generation job
    fn create_job(
        &self,
        request: &JobRequest,
    ) -> impl Future<Output = Result<JobHandle, ClientError>> + Send;

    /// Poll the current state of a job
    fn poll_job(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<JobSnapshot, ClientError>> + Send;
}

/// Client for the image-generation service
pub trait ImageClient: Send + Sync {
    /// Generate one image; `Ok(None)` means the service declined
    fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> impl Future<Output = Result<Option<GeneratedImage>, ClientError>> + Send;
}

/// Read access to a site's published content, the crawler's target
pub trait SiteContentRepository: Send + Sync {
    /// List every collection the site exposes
    fn list_collections(
        &self,
        site_id: &str,
    ) -> impl Future<Output = Result<Vec<Collection>, ClientError>> + Send;

    /// List one page of items from a collection
    fn list_items(
        &self,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<ItemPage, ClientError>> + Send;

    /// Fetch the full content body of one item (used by deep link analysis)
    fn get_item_content(
        &self,
        item_id: &str,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_serialization() {
        let json = serde_json::to_string(&JobState::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let state: JobState = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(state, JobState::Completed);
    }

    #[test]
    fn test_snapshot_defaults() {
        let snapshot: JobSnapshot =
            serde_json::from_str(r#"{"state":"pending","result":null,"error_message":null}"#)
                .unwrap();
        assert_eq!(snapshot.state, JobState::Pending);
        assert_eq!(snapshot.progress, 0);
    }
}
