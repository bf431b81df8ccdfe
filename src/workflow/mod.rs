//! Workflow orchestrator
//!
//! The top-level state machine of the pipeline. One [`Orchestrator`] run
//! sequences five phases over the collaborator clients: content generation
//! (polled job), image generation, content enhancement, interlinking, and
//! the publishing-readiness gate. Content generation, enhancement, and the
//! readiness gate are critical; image generation and interlinking are
//! best-effort and record their failures inside their own result instead
//! of aborting the run.
//!
//! Observers subscribe to a watch channel and receive a state snapshot
//! after every mutation, so several consumers (UI, audit log) can follow
//! the same run.

mod config;
mod error;
mod progress;
mod state;

pub use config::{SiteCredentials, WorkflowConfig, WorkflowConfigBuilder};
pub use error::WorkflowError;
pub use state::{
    ContentGenerationResult, EnhancementResult, ImageGenerationResult, InterlinkingResult,
    PhaseStatus, ReadinessReport, WorkflowPhase, WorkflowState,
};

use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::{
    ContentJobClient, ImageClient, ImageRequest, ImageRole, JobRequest, JobState,
    SiteContentRepository,
};
use crate::clusters::analyze_clusters;
use crate::crawler::{CrawlerConfig, crawl_collections};
use crate::index::index_content;
use crate::interlink::{
    AuthorityTable, DraftContent, ExternalLinkOptions, InterlinkOptions, LinkCaps,
    analyze_interlinking_deep, apply_links, cluster_opportunities, find_external_links,
};
use crate::scoring::{AnalyzeRequest, analyze};
use crate::text;

/// Fixed interval between generation-job polls
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Maximum polls before the generation job is declared timed out
const MAX_POLL_ATTEMPTS: u32 = 60;

/// Featured image dimensions (16:9)
const FEATURED_SIZE: (u32, u32) = (1600, 900);

/// Thumbnail dimensions (1:1)
const THUMBNAIL_SIZE: (u32, u32) = (800, 800);

/// Maximum length of a derived slug and SEO title
const MAX_TITLE_LEN: usize = 60;

/// Maximum length of a derived meta description
const MAX_META_LEN: usize = 160;

/// Applied-link count at which interlinking coverage reaches 100
const FULL_COVERAGE_LINKS: f64 = 8.0;

/// The five-phase pipeline state machine
///
/// Generic over the collaborator clients so runs can execute against the
/// HTTP implementations or the mocks interchangeably.
pub struct Orchestrator<J, I, S> {
    jobs: J,
    images: I,
    site: S,
    authority: AuthorityTable,
    poll_interval: Duration,
    max_poll_attempts: u32,
    tx: watch::Sender<WorkflowState>,
    rx: watch::Receiver<WorkflowState>,
}

impl<J, I, S> Orchestrator<J, I, S>
where
    J: ContentJobClient,
    I: ImageClient,
    S: SiteContentRepository,
{
    /// Create an orchestrator over the given collaborator clients
    pub fn new(jobs: J, images: I, site: S) -> Self {
        let (tx, rx) = watch::channel(WorkflowState::new());
        Self {
            jobs,
            images,
            site,
            authority: AuthorityTable::default(),
            poll_interval: POLL_INTERVAL,
            max_poll_attempts: MAX_POLL_ATTEMPTS,
            tx,
            rx,
        }
    }

    /// Replace the external-link authority table
    pub fn with_authority_table(mut self, table: AuthorityTable) -> Self {
        self.authority = table;
        self
    }

    /// Subscribe to state snapshots published after every mutation
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.rx.clone()
    }

    /// Execute one pipeline run
    ///
    /// A critical-phase failure is captured in the returned state
    /// (`phase: Failed`, `error` set), never returned as `Err`.
    #[instrument(skip(self, config), fields(topic = %config.topic))]
    pub async fn execute(&self, config: &WorkflowConfig) -> WorkflowState {
        let mut state = WorkflowState::new();
        info!("Starting workflow run {}", state.id);
        self.publish(&mut state);

        match self.run(config, &mut state).await {
            Ok(()) => {
                state.phase = WorkflowPhase::Completed;
                state.progress = 100;
                info!("Workflow run {} completed", state.id);
            }
            Err(e) => {
                error!("Workflow run {} failed: {}", state.id, e);
                state.phase = WorkflowPhase::Failed;
                state.error = Some(e.to_string());
            }
        }
        self.publish(&mut state);
        state
    }

    async fn run(
        &self,
        config: &WorkflowConfig,
        state: &mut WorkflowState,
    ) -> Result<(), WorkflowError> {
        self.enter_phase(state, WorkflowPhase::ContentGeneration);
        self.generate_content(config, state).await?;

        self.enter_phase(state, WorkflowPhase::ImageGeneration);
        self.generate_images(config, state).await;

        self.enter_phase(state, WorkflowPhase::ContentEnhancement);
        self.enhance_content(config, state)?;

        self.enter_phase(state, WorkflowPhase::Interlinking);
        self.apply_interlinking(config, state).await;

        self.enter_phase(state, WorkflowPhase::PublishingPreparation);
        self.prepare_readiness(state)?;
        Ok(())
    }

    fn enter_phase(&self, state: &mut WorkflowState, phase: WorkflowPhase) {
        debug!("Entering phase {:?}", phase);
        state.phase = phase;
        state.progress = state.progress.max(progress::band(phase).0);
        self.publish(state);
    }

    fn publish(&self, state: &mut WorkflowState) {
        state.updated_at = chrono::Utc::now();
        self.tx.send_replace(state.clone());
    }

    /// Phase 1: submit the generation job and poll it to completion
    async fn generate_content(
        &self,
        config: &WorkflowConfig,
        state: &mut WorkflowState,
    ) -> Result<(), WorkflowError> {
        let request = JobRequest {
            topic: config.topic.clone(),
            keywords: config.keywords.clone(),
            target_audience: config.target_audience.clone(),
            tone: config.tone.clone(),
            word_count: config.word_count,
            quality_level: config.quality_level.clone(),
        };
        let handle = self
            .jobs
            .create_job(&request)
            .await
            .map_err(|e| WorkflowError::JobCreation(e.to_string()))?;
        info!("Generation job {} submitted", handle.job_id);

        for attempt in 1..=self.max_poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let snapshot = match self.jobs.poll_job(&handle.job_id).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Poll {} for job {} failed: {}", attempt, handle.job_id, e);
                    continue;
                }
            };
            let fraction = f64::from(attempt) / f64::from(self.max_poll_attempts);
            state.progress = state
                .progress
                .max(progress::within_band(WorkflowPhase::ContentGeneration, fraction));
            self.publish(state);

            match snapshot.state {
                JobState::Completed => {
                    let article = snapshot.result.ok_or(WorkflowError::MissingResult)?;
                    info!(
                        "Job {} completed after {} polls ({} words)",
                        handle.job_id, attempt, article.word_count
                    );
                    state.content = Some(ContentGenerationResult {
                        content: article.content,
                        title: article.title,
                        excerpt: article.excerpt,
                        word_count: article.word_count,
                        seo: article.seo,
                    });
                    return Ok(());
                }
                JobState::Failed => {
                    return Err(WorkflowError::JobFailed(
                        snapshot
                            .error_message
                            .unwrap_or_else(|| "content generation job failed".to_string()),
                    ));
                }
                JobState::Pending | JobState::Processing => {}
            }
        }
        Err(WorkflowError::JobTimeout {
            attempts: self.max_poll_attempts,
        })
    }

    /// Phase 2 (best-effort): request a featured image and a thumbnail
    async fn generate_images(&self, config: &WorkflowConfig, state: &mut WorkflowState) {
        if !config.generate_featured_image && !config.generate_content_images {
            debug!("Image flags unset, image generation marked completed");
            state.images = Some(ImageGenerationResult {
                status: PhaseStatus::Completed,
                featured: None,
                thumbnail: None,
                error: None,
            });
            return;
        }

        let mut result = ImageGenerationResult {
            status: PhaseStatus::Completed,
            featured: None,
            thumbnail: None,
            error: None,
        };

        let featured = ImageRequest {
            topic: config.topic.clone(),
            keywords: config.keywords.clone(),
            style: config.image_style.clone(),
            width: FEATURED_SIZE.0,
            height: FEATURED_SIZE.1,
            role: ImageRole::Featured,
        };
        match self.images.generate_image(&featured).await {
            Ok(image) => result.featured = image,
            Err(e) => {
                warn!("Featured image generation failed: {}", e);
                result.status = PhaseStatus::Failed;
                result.error = Some(e.to_string());
            }
        }
        state.progress = state
            .progress
            .max(progress::within_band(WorkflowPhase::ImageGeneration, 0.5));
        self.publish(state);

        // The thumbnail call is independent; a featured failure above does
        // not block it, and vice versa.
        if config.generate_featured_image {
            let thumbnail = ImageRequest {
                topic: config.topic.clone(),
                keywords: config.keywords.clone(),
                style: config.image_style.clone(),
                width: THUMBNAIL_SIZE.0,
                height: THUMBNAIL_SIZE.1,
                role: ImageRole::Thumbnail,
            };
            match self.images.generate_image(&thumbnail).await {
                Ok(image) => result.thumbnail = image,
                Err(e) => {
                    warn!("Thumbnail generation failed: {}", e);
                    result.status = PhaseStatus::Failed;
                    result.error.get_or_insert(e.to_string());
                }
            }
        }
        state.images = Some(result);
        self.publish(state);
    }

    /// Phase 3: score the content and derive publishing metadata
    fn enhance_content(
        &self,
        config: &WorkflowConfig,
        state: &mut WorkflowState,
    ) -> Result<(), WorkflowError> {
        let generated = state.content.as_ref().ok_or(WorkflowError::MissingResult)?;
        let has_featured_image = state
            .images
            .as_ref()
            .is_some_and(|images| images.featured.is_some());

        let hinted_meta = generated
            .seo
            .as_ref()
            .and_then(|seo| seo.meta_description.clone());
        let request = AnalyzeRequest {
            title: Some(generated.title.clone()),
            meta_description: hinted_meta.clone(),
            keywords: config.keywords.clone(),
            target_keyword: config.primary_keyword().map(str::to_string),
            has_featured_image,
        };
        let analysis = analyze(&generated.content, &request)
            .map_err(|e| WorkflowError::Enhancement(e.to_string()))?;

        let slug = text::slugify(&generated.title, MAX_TITLE_LEN);
        let seo_title = derive_seo_title(&generated.title, config.primary_keyword());
        let meta_description = match hinted_meta {
            Some(meta) if !meta.trim().is_empty() => truncate_with_ellipsis(&meta, MAX_META_LEN),
            _ => derive_meta_description(&generated.content),
        };
        let structured_data = config.generate_structured_data.then(|| {
            json!({
                "@context": "https://schema.org",
                "@type": "Article",
                "headline": seo_title,
                "description": meta_description,
                "wordCount": analysis.word_count,
                "keywords": config.keywords.join(", "),
                "image": state
                    .images
                    .as_ref()
                    .and_then(|images| images.featured.as_ref())
                    .map(|image| image.image_url.clone()),
            })
        });

        debug!(
            "Enhancement derived slug '{}' (quality {})",
            slug, analysis.quality_score
        );
        state.enhancement = Some(EnhancementResult {
            analysis,
            slug,
            seo_title,
            meta_description,
            structured_data,
        });
        self.publish(state);
        Ok(())
    }

    /// Phase 4 (best-effort): crawl, cluster, and weave links into the content
    async fn apply_interlinking(&self, config: &WorkflowConfig, state: &mut WorkflowState) {
        let Some(credentials) = config
            .site_credentials
            .as_ref()
            .filter(|_| config.crawl_website)
        else {
            debug!("Crawling disabled or no site credentials, interlinking skipped");
            state.interlinking = Some(InterlinkingResult::skipped());
            self.publish(state);
            return;
        };

        match self.run_interlinking(config, credentials, state).await {
            Ok(result) => state.interlinking = Some(result),
            Err(e) => {
                warn!("Interlinking failed, continuing without links: {}", e);
                state.interlinking = Some(InterlinkingResult {
                    status: PhaseStatus::Failed,
                    applied_links: Vec::new(),
                    pages_crawled: 0,
                    cluster_count: 0,
                    error: Some(e.to_string()),
                });
            }
        }
        self.publish(state);
    }

    async fn run_interlinking(
        &self,
        config: &WorkflowConfig,
        credentials: &SiteCredentials,
        state: &mut WorkflowState,
    ) -> Result<InterlinkingResult, WorkflowError> {
        let (body, title) = match &state.content {
            Some(generated) => (generated.content.clone(), generated.title.clone()),
            None => return Err(WorkflowError::MissingResult),
        };

        let crawl_config = CrawlerConfig::builder()
            .base_url(&credentials.site_url)
            .build();
        let pages = crawl_collections(&self.site, &credentials.site_id, &crawl_config)
            .await
            .map_err(|e| WorkflowError::Interlinking(e.to_string()))?;
        let index = index_content(&pages);
        let clusters = analyze_clusters(&index);
        debug!(
            "Crawled {} pages into {} clusters",
            pages.len(),
            clusters.clusters.len()
        );

        let draft = DraftContent {
            content: body.clone(),
            title,
            keywords: expand_terms(&config.keywords),
            topics: expand_terms(std::slice::from_ref(&config.topic)),
        };

        let options = InterlinkOptions {
            max_internal_links: config.max_internal_links,
            ..InterlinkOptions::default()
        };
        let internal = analyze_interlinking_deep(&draft, &index, &options, &self.site)
            .await
            .map_err(|e| WorkflowError::Interlinking(e.to_string()))?;
        let cluster_links = if config.include_cluster_links {
            cluster_opportunities(&draft, &clusters, 2)
        } else {
            Vec::new()
        };
        let external = find_external_links(
            &draft,
            &self.authority,
            &ExternalLinkOptions {
                max_links: config.max_external_links,
            },
        );

        let caps = LinkCaps {
            max_internal: config.max_internal_links,
            max_external: config.max_external_links,
        };
        let application = apply_links(
            &body,
            &internal,
            &cluster_links,
            &external.opportunities,
            &caps,
        );
        info!(
            "Applied {} links ({} skipped)",
            application.applied.len(),
            application.skipped.len()
        );
        if let Some(generated) = state.content.as_mut() {
            generated.content = application.content;
        }

        Ok(InterlinkingResult {
            status: PhaseStatus::Completed,
            applied_links: application.applied,
            pages_crawled: pages.len(),
            cluster_count: clusters.clusters.len(),
            error: None,
        })
    }

    /// Phase 5: the readiness gate
    ///
    /// Missing required fields make the draft not ready; they are reported
    /// in the result, never raised.
    fn prepare_readiness(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        let generated = state.content.as_ref().ok_or(WorkflowError::MissingResult)?;
        let enhancement = state
            .enhancement
            .as_ref()
            .ok_or_else(|| WorkflowError::Enhancement("enhancement result missing".to_string()))?;
        let analysis = &enhancement.analysis;

        let mut issues = Vec::new();
        if generated.title.trim().is_empty() {
            issues.push("Title is empty".to_string());
        }
        if generated.content.trim().is_empty() {
            issues.push("Content is empty".to_string());
        }
        if enhancement.slug.is_empty() {
            issues.push("Slug could not be derived".to_string());
        }

        let applied_links = state
            .interlinking
            .as_ref()
            .map_or(0, |result| result.applied_links.len());
        let coverage = (applied_links as f64 / FULL_COVERAGE_LINKS * 100.0).min(100.0);
        let has_featured_image = state
            .images
            .as_ref()
            .is_some_and(|images| images.featured.is_some());

        let score = 0.2 * f64::from(analysis.readability_score)
            + 0.3 * f64::from(analysis.seo_score)
            + 0.25 * f64::from(analysis.quality_score)
            + 0.15 * coverage
            + 0.1 * if has_featured_image { 100.0 } else { 0.0 };
        let content_score = score.round().clamp(0.0, 100.0) as u8;

        let mut warnings = Vec::new();
        if generated.excerpt.is_none() {
            warnings.push("No excerpt was generated".to_string());
        }
        if !has_featured_image {
            warnings.push("No featured image is attached".to_string());
        }
        if analysis.seo_score < 60 {
            warnings.push(format!("SEO score is low ({})", analysis.seo_score));
        }
        if analysis.readability_score < 60 {
            warnings.push(format!(
                "Readability score is low ({})",
                analysis.readability_score
            ));
        }

        let mut suggestions = analysis.recommendations.clone();
        if applied_links == 0 {
            suggestions.push(
                "Add internal and external links to improve interlinking coverage".to_string(),
            );
        }

        info!(
            "Readiness: score {}, {} issue(s), {} warning(s)",
            content_score,
            issues.len(),
            warnings.len()
        );
        state.readiness = Some(ReadinessReport {
            is_ready: issues.is_empty(),
            content_score,
            issues,
            warnings,
            suggestions,
        });
        self.publish(state);
        Ok(())
    }
}

/// Derive an SEO title from the article title and primary keyword
///
/// The title is reused as-is when it already carries the keyword and fits;
/// otherwise the keyword is appended and the result truncated.
fn derive_seo_title(title: &str, primary_keyword: Option<&str>) -> String {
    match primary_keyword {
        Some(keyword)
            if text::contains_ignore_case(title, keyword)
                && title.chars().count() <= MAX_TITLE_LEN =>
        {
            title.to_string()
        }
        Some(keyword) => truncate_with_ellipsis(&format!("{} | {}", title, keyword), MAX_TITLE_LEN),
        None => truncate_with_ellipsis(title, MAX_TITLE_LEN),
    }
}

/// Derive a meta description from the first two sentences of the plain text
fn derive_meta_description(content: &str) -> String {
    let plain = text::strip_html(content);
    let sentences = text::split_sentences(&plain);
    if sentences.is_empty() {
        return String::new();
    }
    let description = sentences
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(". ");
    truncate_with_ellipsis(&format!("{}.", description), MAX_META_LEN)
}

fn truncate_with_ellipsis(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        return value.trim().to_string();
    }
    let truncated: String = value.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", truncated.trim_end())
}

/// Expand multi-word phrases with their individual significant words
///
/// Crawled pages carry single-word keywords and topics, so matching a
/// phrase like "pet grooming" requires its constituent terms too.
fn expand_terms(phrases: &[String]) -> Vec<String> {
    let mut terms: Vec<String> = phrases.to_vec();
    for phrase in phrases {
        for token in text::tokenize(phrase) {
            if token.len() > 3 && !terms.contains(&token) {
                terms.push(token);
            }
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::GeneratedArticle;
    use crate::clients::mock::{MockImageClient, MockJobClient, MockSiteRepository, item};

    fn grooming_article() -> GeneratedArticle {
        GeneratedArticle {
            content: "<h1>Best Pet Grooming Services</h1>\
                <p>Pet grooming keeps dogs and cats healthy and comfortable. Regular \
                dog grooming prevents matted fur and skin problems.</p>\
                <h2>Choosing a groomer</h2>\
                <p>Look for certified groomers with good reviews. Ask about their \
                experience with your breed before booking.</p>\
                <h2>Grooming at home</h2>\
                <p>Brush your pet weekly and trim nails monthly. A consistent routine \
                makes grooming easier for everyone.</p>"
                .to_string(),
            title: "Best Pet Grooming Services".to_string(),
            excerpt: Some("A practical guide to pet grooming.".to_string()),
            word_count: 800,
            seo: None,
        }
    }

    fn grooming_config() -> WorkflowConfig {
        WorkflowConfig::builder()
            .topic("Best Pet Grooming Services")
            .keywords(vec![
                "pet grooming".to_string(),
                "dog grooming".to_string(),
            ])
            .word_count(800)
            .build()
    }

    fn orchestrator(
        jobs: MockJobClient,
        images: MockImageClient,
        site: MockSiteRepository,
    ) -> Orchestrator<MockJobClient, MockImageClient, MockSiteRepository> {
        Orchestrator::new(jobs, images, site)
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_completes() {
        let orchestrator = orchestrator(
            MockJobClient::completes_with(grooming_article(), 2),
            MockImageClient::returning_images(),
            MockSiteRepository::new(),
        );
        let config = WorkflowConfig {
            generate_featured_image: true,
            ..grooming_config()
        };

        let state = orchestrator.execute(&config).await;

        assert_eq!(state.phase, WorkflowPhase::Completed);
        assert_eq!(state.progress, 100);
        assert!(state.error.is_none());

        let content = state.content.expect("content result");
        assert!(content.content.len() >= 100);
        assert_eq!(content.title, "Best Pet Grooming Services");

        let enhancement = state.enhancement.expect("enhancement result");
        assert_eq!(enhancement.slug, "best-pet-grooming-services");
        assert!(enhancement.slug.len() <= 60);
        assert!(
            enhancement
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        );
        assert!(enhancement.meta_description.len() <= 160);

        let readiness = state.readiness.expect("readiness report");
        assert!(readiness.is_ready);
        assert!(readiness.content_score > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_failure_does_not_abort_run() {
        let orchestrator = orchestrator(
            MockJobClient::completes_with(grooming_article(), 0),
            MockImageClient::failing(),
            MockSiteRepository::new(),
        );
        let config = WorkflowConfig {
            generate_featured_image: true,
            ..grooming_config()
        };

        let state = orchestrator.execute(&config).await;

        assert_eq!(state.phase, WorkflowPhase::Completed);
        let images = state.images.expect("image result");
        assert_eq!(images.status, PhaseStatus::Failed);
        assert!(images.error.is_some());
        assert!(state.enhancement.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_exactly_sixty_polls() {
        let jobs = MockJobClient::never_completes();
        let orchestrator = orchestrator(
            jobs.clone(),
            MockImageClient::returning_nothing(),
            MockSiteRepository::new(),
        );

        let state = orchestrator.execute(&grooming_config()).await;

        assert_eq!(state.phase, WorkflowPhase::Failed);
        assert_eq!(jobs.poll_count(), 60);
        assert!(state.error.unwrap().contains("timed out after 60 polls"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_failure_surfaces_backend_message() {
        let orchestrator = orchestrator(
            MockJobClient::fails_with("model quota exceeded"),
            MockImageClient::returning_nothing(),
            MockSiteRepository::new(),
        );

        let state = orchestrator.execute(&grooming_config()).await;

        assert_eq!(state.phase, WorkflowPhase::Failed);
        assert_eq!(state.error.as_deref(), Some("model quota exceeded"));
        assert!(state.content.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_job_creation_fails_run() {
        let orchestrator = orchestrator(
            MockJobClient::rejects_creation(),
            MockImageClient::returning_nothing(),
            MockSiteRepository::new(),
        );

        let state = orchestrator.execute(&grooming_config()).await;

        assert_eq!(state.phase, WorkflowPhase::Failed);
        assert!(state.error.unwrap().contains("Job creation failed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interlinking_skipped_without_credentials() {
        let orchestrator = orchestrator(
            MockJobClient::completes_with(grooming_article(), 0),
            MockImageClient::returning_nothing(),
            MockSiteRepository::new(),
        );
        let config = WorkflowConfig {
            crawl_website: true, // no credentials supplied
            ..grooming_config()
        };

        let state = orchestrator.execute(&config).await;

        assert_eq!(state.phase, WorkflowPhase::Completed);
        let interlinking = state.interlinking.expect("interlinking result");
        assert_eq!(interlinking.status, PhaseStatus::Skipped);
        assert!(interlinking.applied_links.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interlinking_runs_against_crawled_site() {
        let site = MockSiteRepository::new().with_collection(
            "blog",
            "Blog",
            vec![
                item(
                    "a",
                    "grooming-basics",
                    "Grooming Basics Guide",
                    "<p>Grooming basics for every dog owner. Grooming tools, grooming \
                     schedules, and grooming safety tips for happy pets.</p>",
                ),
                item(
                    "b",
                    "grooming-tools",
                    "Grooming Tools Review",
                    "<p>The best grooming tools for home grooming. Brushes, clippers, \
                     and grooming tables compared for every budget.</p>",
                ),
            ],
        );
        let orchestrator = orchestrator(
            MockJobClient::completes_with(grooming_article(), 0),
            MockImageClient::returning_nothing(),
            site,
        );
        let config = WorkflowConfig {
            crawl_website: true,
            site_credentials: Some(SiteCredentials {
                site_id: "site-1".to_string(),
                site_url: "https://example.com".to_string(),
            }),
            ..grooming_config()
        };

        let state = orchestrator.execute(&config).await;

        assert_eq!(state.phase, WorkflowPhase::Completed);
        let interlinking = state.interlinking.expect("interlinking result");
        assert_eq!(interlinking.status, PhaseStatus::Completed);
        assert_eq!(interlinking.pages_crawled, 2);
        assert!(interlinking.applied_links.len() <= 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_never_decreases() {
        let orchestrator = orchestrator(
            MockJobClient::completes_with(grooming_article(), 3),
            MockImageClient::returning_images(),
            MockSiteRepository::new(),
        );
        let mut receiver = orchestrator.subscribe();
        let observer = tokio::spawn(async move {
            let mut last = 0u8;
            while receiver.changed().await.is_ok() {
                let progress = receiver.borrow().progress;
                assert!(progress >= last, "progress went from {} to {}", last, progress);
                last = progress;
            }
            last
        });
        let config = WorkflowConfig {
            generate_featured_image: true,
            ..grooming_config()
        };

        let state = orchestrator.execute(&config).await;
        drop(orchestrator);

        assert_eq!(state.phase, WorkflowPhase::Completed);
        let final_progress = observer.await.expect("observer task");
        assert_eq!(final_progress, 100);
    }

    #[test]
    fn test_derive_seo_title_reuses_fitting_title() {
        assert_eq!(
            derive_seo_title("Best Pet Grooming Services", Some("pet grooming")),
            "Best Pet Grooming Services"
        );
        assert_eq!(
            derive_seo_title("A Guide to Happy Dogs", Some("pet grooming")),
            "A Guide to Happy Dogs | pet grooming"
        );
    }

    #[test]
    fn test_derive_seo_title_truncates() {
        let long_title = "An Extremely Long Title About Many Things That Goes On And On Forever";
        let derived = derive_seo_title(long_title, Some("pet grooming"));
        assert!(derived.chars().count() <= 60);
        assert!(derived.ends_with("..."));
    }

    #[test]
    fn test_derive_meta_description_two_sentences() {
        let content = "<p>First sentence here. Second sentence here. Third is dropped.</p>";
        let meta = derive_meta_description(content);
        assert_eq!(meta, "First sentence here. Second sentence here.");
    }

    #[test]
    fn test_expand_terms_splits_phrases() {
        let terms = expand_terms(&["pet grooming".to_string()]);
        assert!(terms.contains(&"pet grooming".to_string()));
        assert!(terms.contains(&"grooming".to_string()));
        // "pet" is too short to be a significant term on its own
        assert!(!terms.contains(&"pet".to_string()));
    }
}
