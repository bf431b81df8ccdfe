//! Field extraction for crawled collection items
//!
//! Collection schemas name their fields inconsistently, so title, content,
//! and excerpt are each resolved through a prioritized list of known field
//! names; the first non-empty match wins. Keywords and topics come from
//! frequency-based term extraction over the stripped content.

use crate::clients::CollectionItem;
use crate::crawler::{CrawlError, CrawledPage};
use crate::text;

/// Candidate field names for the page title, in priority order
const TITLE_FIELDS: &[&str] = &["name", "title", "post-title", "heading"];

/// Candidate field names for the content body, in priority order
const CONTENT_FIELDS: &[&str] = &["post-body", "content", "body", "rich-text", "description"];

/// Candidate field names for the excerpt, in priority order
const EXCERPT_FIELDS: &[&str] = &["post-summary", "excerpt", "summary", "meta-description"];

/// Words shorter than this are ignored by keyword/topic extraction
const MIN_TERM_LEN: usize = 3;

/// Number of keywords extracted per page
const KEYWORD_COUNT: usize = 10;

/// Number of topics extracted per page
const TOPIC_COUNT: usize = 3;

/// Parse one collection item into a crawled page
///
/// # Arguments
///
/// * `item` - The raw collection item
/// * `base_url` - Site base URL used to build the page URL from the slug
///
/// # Returns
///
/// A [`CrawledPage`], or an error when no title or content field matches
pub fn parse_item(item: &CollectionItem, base_url: &str) -> Result<CrawledPage, CrawlError> {
    let title = first_field(&item.field_data, TITLE_FIELDS).ok_or(CrawlError::MissingField {
        item_id: item.id.clone(),
        field: "title",
    })?;
    let content = first_field(&item.field_data, CONTENT_FIELDS).ok_or(CrawlError::MissingField {
        item_id: item.id.clone(),
        field: "content",
    })?;
    let excerpt = first_field(&item.field_data, EXCERPT_FIELDS);

    let plain_text = text::strip_html(&content);
    let word_count = text::word_count(&plain_text);
    let keywords = text::top_terms(&plain_text, MIN_TERM_LEN, KEYWORD_COUNT);
    let topics = title_topics(&title);

    let url = match &item.slug {
        Some(slug) => format!("{}/{}", base_url.trim_end_matches('/'), slug),
        None => format!("{}/{}", base_url.trim_end_matches('/'), item.id),
    };

    Ok(CrawledPage {
        id: item.id.clone(),
        url,
        title,
        content,
        excerpt,
        word_count,
        keywords,
        topics,
    })
}

/// Resolve the first non-empty string among the candidate field names
fn first_field(field_data: &serde_json::Value, candidates: &[&str]) -> Option<String> {
    for name in candidates {
        if let Some(value) = field_data.get(name).and_then(|v| v.as_str()) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Top title words (longer than the term threshold) become the page topics
fn title_topics(title: &str) -> Vec<String> {
    let mut topics = Vec::new();
    for word in text::tokenize(title) {
        if word.chars().count() > MIN_TERM_LEN && !topics.contains(&word) {
            topics.push(word);
        }
        if topics.len() == TOPIC_COUNT {
            break;
        }
    }
    topics
}
