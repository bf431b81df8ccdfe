//! Site crawler module
//!
//! This module walks every collection a site content repository exposes,
//! paginating items and parsing each one into a normalized page record.
//! Failures are isolated: a malformed item is skipped, an unreachable
//! collection is skipped, and the crawl continues with whatever remains.

mod config;
mod error;
mod extract;

pub use config::CrawlerConfig;
pub use error::CrawlError;
pub use extract::parse_item;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::clients::SiteContentRepository;

/// A normalized page record produced by the crawler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawledPage {
    /// Identifier of the source collection item
    pub id: String,

    /// Public URL of the page
    pub url: String,

    /// Page title
    pub title: String,

    /// HTML content body
    pub content: String,

    /// Excerpt, when the source item carried one
    pub excerpt: Option<String>,

    /// Word count of the stripped content
    pub word_count: usize,

    /// Frequency-ranked keywords extracted from the content
    pub keywords: Vec<String>,

    /// Topics extracted from the title
    pub topics: Vec<String>,
}

/// Crawl every collection of a site into normalized page records
///
/// # Arguments
///
/// * `repository` - The site content repository to read from
/// * `site_id` - Identifier of the site to crawl
/// * `config` - Crawl tuning (base URL, page size, overall cap)
///
/// # Returns
///
/// All pages that parsed successfully. Only a failure to list the site's
/// collections is fatal; item and collection failures are logged and
/// skipped.
#[instrument(skip(repository, config))]
pub async fn crawl_collections<R: SiteContentRepository>(
    repository: &R,
    site_id: &str,
    config: &CrawlerConfig,
) -> Result<Vec<CrawledPage>, CrawlError> {
    let collections = repository.list_collections(site_id).await?;
    info!("Crawling {} collections for site {}", collections.len(), site_id);

    let mut pages = Vec::new();

    'collections: for collection in &collections {
        let mut offset = 0;
        loop {
            let page = match repository
                .list_items(&collection.id, offset, config.page_size)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        "Skipping collection {} ({}): {}",
                        collection.id, collection.name, e
                    );
                    continue 'collections;
                }
            };

            let fetched = page.items.len();
            for item in &page.items {
                match extract::parse_item(item, &config.base_url) {
                    Ok(parsed) => {
                        debug!("Parsed {} ({} words)", parsed.url, parsed.word_count);
                        pages.push(parsed);
                    }
                    Err(e) => {
                        warn!("Skipping item {}: {}", item.id, e);
                    }
                }
                if pages.len() >= config.max_pages {
                    info!("Reached crawl cap of {} pages", config.max_pages);
                    break 'collections;
                }
            }

            offset += fetched;
            if fetched < config.page_size || offset >= page.total {
                break;
            }
        }
    }

    info!("Crawled {} pages", pages.len());
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CollectionItem;
    use crate::clients::mock::{MockSiteRepository, item};
    use serde_json::json;

    fn bad_item(id: &str) -> CollectionItem {
        CollectionItem {
            id: id.to_string(),
            slug: None,
            field_data: json!({"unrelated": 42}),
            published_on: None,
            last_updated: None,
        }
    }

    #[tokio::test]
    async fn test_crawl_parses_all_items() {
        let repo = MockSiteRepository::new().with_collection(
            "blog",
            "Blog",
            vec![
                item("a", "a", "Dog Grooming Guide", "<p>Brush the dog daily.</p>"),
                item("b", "b", "Cat Care Basics", "<p>Feed the cat well.</p>"),
            ],
        );

        let config = CrawlerConfig::builder()
            .base_url("https://example.com")
            .build();
        let pages = crawl_collections(&repo, "site-1", &config).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].url, "https://example.com/a");
        assert!(pages[0].word_count > 0);
    }

    #[tokio::test]
    async fn test_malformed_item_is_skipped_not_fatal() {
        let repo = MockSiteRepository::new().with_collection(
            "blog",
            "Blog",
            vec![
                item("good", "good", "A Title", "<p>content</p>"),
                bad_item("bad"),
                item("good2", "good2", "Another", "<p>more content</p>"),
            ],
        );

        let pages = crawl_collections(&repo, "site-1", &CrawlerConfig::default())
            .await
            .unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.id != "bad"));
    }

    #[tokio::test]
    async fn test_unreachable_collection_is_skipped_not_fatal() {
        let repo = MockSiteRepository::new()
            .with_unreachable_collection("broken", "Broken")
            .with_collection(
                "blog",
                "Blog",
                vec![item("a", "a", "A Title", "<p>content</p>")],
            );

        let pages = crawl_collections(&repo, "site-1", &CrawlerConfig::default())
            .await
            .unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_pagination_walks_every_page() {
        let items: Vec<CollectionItem> = (0..7)
            .map(|i| {
                item(
                    &format!("i-{}", i),
                    &format!("slug-{}", i),
                    "A Title Here",
                    "<p>some body text</p>",
                )
            })
            .collect();
        let repo = MockSiteRepository::new().with_collection("blog", "Blog", items);

        let config = CrawlerConfig::builder().page_size(3).build();
        let pages = crawl_collections(&repo, "site-1", &config).await.unwrap();
        assert_eq!(pages.len(), 7);
    }

    #[tokio::test]
    async fn test_crawl_cap_is_enforced() {
        let items: Vec<CollectionItem> = (0..10)
            .map(|i| item(&format!("i-{}", i), "s", "A Title", "<p>text</p>"))
            .collect();
        let repo = MockSiteRepository::new().with_collection("blog", "Blog", items);

        let config = CrawlerConfig::builder().max_pages(4).build();
        let pages = crawl_collections(&repo, "site-1", &config).await.unwrap();
        assert_eq!(pages.len(), 4);
    }
}
