//! # Crawler Configuration Module
//!
//! This module provides configuration options for the site crawler,
//! including pagination size and overall page caps. It uses a builder
//! pattern for flexible configuration.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: The main configuration struct with crawl parameters
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration

/// Configuration for the site crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Base URL used to build page URLs from item slugs
    pub base_url: String,

    /// Number of items fetched per pagination request
    pub page_size: usize,

    /// Maximum total pages to crawl across all collections
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_size: 100,
            max_pages: 500,
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the base URL used to build page URLs
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the pagination page size
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size.max(1);
        self
    }

    /// Set the maximum total pages to crawl
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = CrawlerConfig::builder()
            .base_url("https://example.com")
            .page_size(25)
            .max_pages(50)
            .build();

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.max_pages, 50);
    }

    #[test]
    fn test_page_size_floor() {
        let config = CrawlerConfig::builder().page_size(0).build();
        assert_eq!(config.page_size, 1);
    }
}
