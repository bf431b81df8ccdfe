//! Content index module
//!
//! This module turns crawled pages into an in-memory content index: one
//! deduplicated keyword/topic record per page. Indexing is a pure
//! transformation with no network calls and is safe to re-run.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::crawler::CrawledPage;

/// One indexed page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedContent {
    /// Identifier of the source page
    pub page_id: String,

    /// Public URL of the page
    pub url: String,

    /// Page title
    pub title: String,

    /// Deduplicated topics
    pub topics: Vec<String>,

    /// Deduplicated keywords
    pub keywords: Vec<String>,

    /// Word count of the page content
    pub word_count: usize,
}

/// In-memory index over a site's crawled content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentIndex {
    entries: Vec<IndexedContent>,
}

impl ContentIndex {
    /// All indexed pages
    pub fn pages(&self) -> &[IndexedContent] {
        &self.entries
    }

    /// Number of indexed pages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an indexed page by its id
    pub fn get(&self, page_id: &str) -> Option<&IndexedContent> {
        self.entries.iter().find(|e| e.page_id == page_id)
    }
}

/// Build a content index from crawled pages
///
/// Deterministic 1:1 mapping; topics and keywords are deduplicated while
/// preserving their extraction order.
#[instrument(skip(pages), fields(page_count = pages.len()))]
pub fn index_content(pages: &[CrawledPage]) -> ContentIndex {
    let entries = pages
        .iter()
        .map(|page| {
            let entry = IndexedContent {
                page_id: page.id.clone(),
                url: page.url.clone(),
                title: page.title.clone(),
                topics: dedup(&page.topics),
                keywords: dedup(&page.keywords),
                word_count: page.word_count,
            };
            debug!(
                "Indexed {} ({} topics, {} keywords)",
                entry.url,
                entry.topics.len(),
                entry.keywords.len()
            );
            entry
        })
        .collect();

    ContentIndex { entries }
}

/// Deduplicate case-insensitively, keeping first occurrences in order
fn dedup(values: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        let lower = value.to_lowercase();
        if !seen.iter().any(|s: &String| s.to_lowercase() == lower) {
            seen.push(value.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, topics: &[&str], keywords: &[&str], word_count: usize) -> CrawledPage {
        CrawledPage {
            id: id.to_string(),
            url: format!("https://example.com/{}", id),
            title: format!("Page {}", id),
            content: "<p>body</p>".to_string(),
            excerpt: None,
            word_count,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            topics: topics.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_one_entry_per_page() {
        let pages = vec![
            page("a", &["grooming"], &["dog"], 500),
            page("b", &["care"], &["cat"], 700),
        ];
        let index = index_content(&pages);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").unwrap().word_count, 500);
    }

    #[test]
    fn test_topics_and_keywords_deduplicated() {
        let pages = vec![page(
            "a",
            &["grooming", "Grooming", "care"],
            &["dog", "dog", "brush"],
            100,
        )];
        let index = index_content(&pages);
        let entry = index.get("a").unwrap();
        assert_eq!(entry.topics, vec!["grooming", "care"]);
        assert_eq!(entry.keywords, vec!["dog", "brush"]);
    }

    #[test]
    fn test_reindexing_is_deterministic() {
        let pages = vec![page("a", &["x"], &["y"], 10)];
        let first = index_content(&pages);
        let second = index_content(&pages);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
