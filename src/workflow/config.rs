//! # Workflow Configuration Module
//!
//! This module provides configuration options for a pipeline run: the
//! generation request, image and SEO flags, and interlinking bounds. It
//! uses a builder pattern for flexible configuration.
//!
//! ## Key Components
//!
//! - `WorkflowConfig`: The main configuration struct with run parameters
//! - `WorkflowConfigBuilder`: Builder pattern implementation for easier configuration
//! - `SiteCredentials`: Access details for the site the crawler reads

use serde::{Deserialize, Serialize};

/// Access details for the site content repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteCredentials {
    /// Site identifier at the content repository
    pub site_id: String,

    /// Public base URL of the site, used to build page URLs from slugs
    pub site_url: String,
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Topic to write about
    pub topic: String,

    /// Keywords the article should target; the first is the primary keyword
    pub keywords: Vec<String>,

    /// Intended audience description
    pub target_audience: String,

    /// Writing tone
    pub tone: String,

    /// Requested article length in words
    pub word_count: u32,

    /// Generation quality tier
    pub quality_level: String,

    /// Request a 16:9 featured image and a 1:1 thumbnail
    pub generate_featured_image: bool,

    /// Request in-content images
    pub generate_content_images: bool,

    /// Visual style hint for generated images
    pub image_style: Option<String>,

    /// Run SEO metadata derivation in the enhancement phase
    pub optimize_for_seo: bool,

    /// Synthesize schema.org Article structured data
    pub generate_structured_data: bool,

    /// Crawl the target site for interlinking
    pub crawl_website: bool,

    /// Maximum internal links to apply
    pub max_internal_links: usize,

    /// Maximum external links to apply
    pub max_external_links: usize,

    /// Also link to topic-cluster pillar pages
    pub include_cluster_links: bool,

    /// Publishing platform hint, passed through to callers
    pub target_platform: Option<String>,

    /// Site access for the crawl; interlinking is skipped without it
    pub site_credentials: Option<SiteCredentials>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            topic: String::new(),
            keywords: Vec::new(),
            target_audience: "general readers".to_string(),
            tone: "professional".to_string(),
            word_count: 800,
            quality_level: "standard".to_string(),
            generate_featured_image: false,
            generate_content_images: false,
            image_style: None,
            optimize_for_seo: true,
            generate_structured_data: false,
            crawl_website: false,
            max_internal_links: 5,
            max_external_links: 3,
            include_cluster_links: true,
            target_platform: None,
            site_credentials: None,
        }
    }
}

/// Builder for WorkflowConfig
#[derive(Debug, Default)]
pub struct WorkflowConfigBuilder {
    config: WorkflowConfig,
}

impl WorkflowConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: WorkflowConfig::default(),
        }
    }

    /// Set the article topic
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.config.topic = topic.into();
        self
    }

    /// Set the target keywords
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.config.keywords = keywords;
        self
    }

    /// Set the intended audience
    pub fn target_audience(mut self, audience: impl Into<String>) -> Self {
        self.config.target_audience = audience.into();
        self
    }

    /// Set the writing tone
    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.config.tone = tone.into();
        self
    }

    /// Set the requested word count
    pub fn word_count(mut self, word_count: u32) -> Self {
        self.config.word_count = word_count;
        self
    }

    /// Set the generation quality tier
    pub fn quality_level(mut self, level: impl Into<String>) -> Self {
        self.config.quality_level = level.into();
        self
    }

    /// Request a featured image and thumbnail
    pub fn generate_featured_image(mut self, enabled: bool) -> Self {
        self.config.generate_featured_image = enabled;
        self
    }

    /// Request in-content images
    pub fn generate_content_images(mut self, enabled: bool) -> Self {
        self.config.generate_content_images = enabled;
        self
    }

    /// Set the image style hint
    pub fn image_style(mut self, style: impl Into<String>) -> Self {
        self.config.image_style = Some(style.into());
        self
    }

    /// Enable or disable structured-data synthesis
    pub fn generate_structured_data(mut self, enabled: bool) -> Self {
        self.config.generate_structured_data = enabled;
        self
    }

    /// Enable the interlinking crawl
    pub fn crawl_website(mut self, enabled: bool) -> Self {
        self.config.crawl_website = enabled;
        self
    }

    /// Set the internal link cap
    pub fn max_internal_links(mut self, max: usize) -> Self {
        self.config.max_internal_links = max;
        self
    }

    /// Set the external link cap
    pub fn max_external_links(mut self, max: usize) -> Self {
        self.config.max_external_links = max;
        self
    }

    /// Enable or disable cluster-pillar links
    pub fn include_cluster_links(mut self, enabled: bool) -> Self {
        self.config.include_cluster_links = enabled;
        self
    }

    /// Set the publishing platform hint
    pub fn target_platform(mut self, platform: impl Into<String>) -> Self {
        self.config.target_platform = Some(platform.into());
        self
    }

    /// Set the site credentials for the crawl
    pub fn site_credentials(mut self, site_id: impl Into<String>, site_url: impl Into<String>) -> Self {
        self.config.site_credentials = Some(SiteCredentials {
            site_id: site_id.into(),
            site_url: site_url.into(),
        });
        self
    }

    /// Build the configuration
    pub fn build(self) -> WorkflowConfig {
        self.config
    }
}

impl WorkflowConfig {
    /// Create a new builder
    pub fn builder() -> WorkflowConfigBuilder {
        WorkflowConfigBuilder::new()
    }

    /// The primary keyword, when any keyword was supplied
    pub fn primary_keyword(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = WorkflowConfig::builder()
            .topic("Best Pet Grooming Services")
            .keywords(vec!["pet grooming".to_string(), "dog grooming".to_string()])
            .word_count(800)
            .generate_featured_image(true)
            .crawl_website(true)
            .site_credentials("site-1", "https://example.com")
            .build();

        assert_eq!(config.topic, "Best Pet Grooming Services");
        assert_eq!(config.primary_keyword(), Some("pet grooming"));
        assert!(config.generate_featured_image);
        assert_eq!(
            config.site_credentials.unwrap().site_url,
            "https://example.com"
        );
    }

    #[test]
    fn test_defaults() {
        let config = WorkflowConfig::default();
        assert_eq!(config.max_internal_links, 5);
        assert_eq!(config.max_external_links, 3);
        assert!(!config.crawl_website);
        assert!(config.primary_keyword().is_none());
    }
}
