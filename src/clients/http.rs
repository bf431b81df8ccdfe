//! HTTP implementation of the collaborator clients
//!
//! This module provides [`ApiClient`], a reqwest-backed client that speaks
//! a simple REST shape for all three collaborator interfaces: content
//! generation jobs, image generation, and site content.

use reqwest::Client as ReqwestClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::clients::{
    ClientError, Collection, ContentJobClient, GeneratedImage, ImageClient, ImageRequest,
    ItemPage, JobHandle, JobRequest, JobSnapshot, SiteContentRepository,
};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the content-operations API
///
/// Handles authentication and request/response formatting for the job
/// queue, the image service, and the site content repository. The client
/// is cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// Bearer token for authentication
    api_token: Option<String>,
}

#[derive(serde::Deserialize)]
struct ItemContent {
    content: String,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API, without a trailing slash
    /// * `api_token` - Optional bearer token
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Result<Self, ClientError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        let base_url = base_url.into();
        Url::parse(&base_url)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.build_url(path)?;
        debug!(%url, "GET");
        let response = self.authorize(self.client.get(url)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.build_url(path)?;
        debug!(%url, "POST");
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }
}

impl ContentJobClient for ApiClient {
    #[instrument(skip(self, request), fields(topic = %request.topic))]
    async fn create_job(&self, request: &JobRequest) -> Result<JobHandle, ClientError> {
        self.post("v1/jobs", request).await
    }

    #[instrument(skip(self))]
    async fn poll_job(&self, job_id: &str) -> Result<JobSnapshot, ClientError> {
        self.get(&format!("v1/jobs/{}", job_id)).await
    }
}

impl ImageClient for ApiClient {
    #[instrument(skip(self, request), fields(role = ?request.role))]
    async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> Result<Option<GeneratedImage>, ClientError> {
        self.post("v1/images", request).await
    }
}

impl SiteContentRepository for ApiClient {
    #[instrument(skip(self))]
    async fn list_collections(&self, site_id: &str) -> Result<Vec<Collection>, ClientError> {
        self.get(&format!("v1/sites/{}/collections", site_id)).await
    }

    #[instrument(skip(self))]
    async fn list_items(
        &self,
        collection_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<ItemPage, ClientError> {
        self.get(&format!(
            "v1/collections/{}/items?offset={}&limit={}",
            collection_id, offset, limit
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn get_item_content(&self, item_id: &str) -> Result<String, ClientError> {
        let body: ItemContent = self.get(&format!("v1/items/{}/content", item_id)).await?;
        Ok(body.content)
    }
}
