//! # Mock Collaborators for Testing
//!
//! Provides in-memory implementations of the collaborator traits for use in
//! tests and dry runs. Each mock can be scripted with a fixed response or a
//! failure to simulate different backend behaviors without network calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::clients::{
    ClientError, Collection, CollectionItem, ContentJobClient, GeneratedArticle, GeneratedImage,
    ImageClient, ImageRequest, ItemPage, JobHandle, JobRequest, JobSnapshot, JobState,
    SiteContentRepository,
};

/// A mock job client that replays a scripted sequence of poll snapshots
///
/// `poll_job` pops snapshots front-to-back; once the script is exhausted the
/// last configured snapshot repeats, so a "never completes" script keeps
/// returning `processing` forever.
#[derive(Debug, Clone)]
pub struct MockJobClient {
    snapshots: Arc<Mutex<Vec<JobSnapshot>>>,
    fail_create: bool,
    polls: Arc<Mutex<u32>>,
}

impl MockJobClient {
    /// A client whose job completes with the given article after `delay_polls` polls
    pub fn completes_with(article: GeneratedArticle, delay_polls: usize) -> Self {
        let mut snapshots = vec![
            JobSnapshot {
                state: JobState::Processing,
                progress: 50,
                result: None,
                error_message: None,
            };
            delay_polls
        ];
        snapshots.push(JobSnapshot {
            state: JobState::Completed,
            progress: 100,
            result: Some(article),
            error_message: None,
        });
        Self::scripted(snapshots)
    }

    /// A client whose job fails with the given backend message
    pub fn fails_with(message: &str) -> Self {
        Self::scripted(vec![JobSnapshot {
            state: JobState::Failed,
            progress: 0,
            result: None,
            error_message: Some(message.to_string()),
        }])
    }

    /// A client whose job reports `processing` forever
    pub fn never_completes() -> Self {
        Self::scripted(vec![JobSnapshot {
            state: JobState::Processing,
            progress: 10,
            result: None,
            error_message: None,
        }])
    }

    /// A client that rejects job creation
    pub fn rejects_creation() -> Self {
        let mut client = Self::never_completes();
        client.fail_create = true;
        client
    }

    /// A client replaying an explicit snapshot script
    pub fn scripted(snapshots: Vec<JobSnapshot>) -> Self {
        Self {
            snapshots: Arc::new(Mutex::new(snapshots)),
            fail_create: false,
            polls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of polls observed so far
    pub fn poll_count(&self) -> u32 {
        *self.polls.lock().expect("poll counter poisoned")
    }
}

impl ContentJobClient for MockJobClient {
    async fn create_job(&self, _request: &JobRequest) -> Result<JobHandle, ClientError> {
        if self.fail_create {
            return Err(ClientError::Api {
                status_code: 503,
                message: "job queue unavailable".to_string(),
            });
        }
        Ok(JobHandle {
            job_id: "mock-job".to_string(),
            queue_id: None,
        })
    }

    async fn poll_job(&self, _job_id: &str) -> Result<JobSnapshot, ClientError> {
        *self.polls.lock().expect("poll counter poisoned") += 1;
        let mut snapshots = self.snapshots.lock().expect("snapshot script poisoned");
        if snapshots.len() > 1 {
            Ok(snapshots.remove(0))
        } else {
            snapshots
                .first()
                .cloned()
                .ok_or_else(|| ClientError::Other("empty snapshot script".to_string()))
        }
    }
}

/// A mock image client returning a fixed image, nothing, or an error
#[derive(Debug, Clone)]
pub struct MockImageClient {
    image: Option<GeneratedImage>,
    fail: bool,
}

impl MockImageClient {
    /// A client that returns a placeholder image sized per request
    pub fn returning_images() -> Self {
        Self {
            image: Some(GeneratedImage {
                image_id: "mock-image".to_string(),
                image_url: "https://images.example.com/mock.webp".to_string(),
                width: 0,
                height: 0,
                format: "webp".to_string(),
            }),
            fail: false,
        }
    }

    /// A client that declines every request without erroring
    pub fn returning_nothing() -> Self {
        Self {
            image: None,
            fail: false,
        }
    }

    /// A client that errors on every request
    pub fn failing() -> Self {
        Self {
            image: None,
            fail: true,
        }
    }
}

impl ImageClient for MockImageClient {
    async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> Result<Option<GeneratedImage>, ClientError> {
        if self.fail {
            return Err(ClientError::Other("image service unavailable".to_string()));
        }
        Ok(self.image.clone().map(|mut image| {
            image.width = request.width;
            image.height = request.height;
            image
        }))
    }
}

/// An in-memory site content repository
///
/// Collections and items are registered up front; individual collections can
/// be marked unreachable to exercise the crawler's failure isolation.
#[derive(Debug, Clone, Default)]
pub struct MockSiteRepository {
    collections: Vec<Collection>,
    items: HashMap<String, Vec<CollectionItem>>,
    contents: HashMap<String, String>,
    unreachable: Vec<String>,
}

impl MockSiteRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection with its items
    pub fn with_collection(
        mut self,
        id: &str,
        name: &str,
        items: Vec<CollectionItem>,
    ) -> Self {
        self.collections.push(Collection {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.items.insert(id.to_string(), items);
        self
    }

    /// Register the full content body for an item (for deep link analysis)
    pub fn with_item_content(mut self, item_id: &str, content: &str) -> Self {
        self.contents.insert(item_id.to_string(), content.to_string());
        self
    }

    /// Mark a collection as unreachable
    pub fn with_unreachable_collection(mut self, id: &str, name: &str) -> Self {
        self.collections.push(Collection {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.unreachable.push(id.to_string());
        self
    }
}

impl SiteContentRepository for MockSiteRepository {
    async fn list_collections(&self, _site_id: &str) -> Result<Vec<Collection>, ClientError> {
        Ok(self.collections.clone())
    }

    async fn list_items(
        &self,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<ItemPage, ClientError> {
        if self.unreachable.iter().any(|id| id == collection_id) {
            return Err(ClientError::Api {
                status_code: 502,
                message: format!("collection {} unreachable", collection_id),
            });
        }
        let items = self.items.get(collection_id).cloned().unwrap_or_default();
        let total = items.len();
        let page: Vec<CollectionItem> = items.into_iter().skip(offset).take(limit).collect();
        Ok(ItemPage { items: page, total })
    }

    async fn get_item_content(&self, item_id: &str) -> Result<String, ClientError> {
        self.contents
            .get(item_id)
            .cloned()
            .ok_or_else(|| ClientError::Other(format!("no content for item {}", item_id)))
    }
}

/// Build a collection item from plain fields, for tests and dry runs
pub fn item(id: &str, slug: &str, title: &str, body_html: &str) -> CollectionItem {
    CollectionItem {
        id: id.to_string(),
        slug: Some(slug.to_string()),
        field_data: serde_json::json!({
            "name": title,
            "post-body": body_html,
        }),
        published_on: None,
        last_updated: None,
    }
}
