//! Link application
//!
//! Merges internal, cluster, and external link opportunities, deduplicates
//! them by URL, enforces the per-kind caps, and inserts anchors into the
//! content. An existing anchor for a URL is never duplicated. Insertion
//! prefers wrapping the first plain-text occurrence of the anchor text;
//! when the anchor text never appears, a short reference line is added at
//! the recommended placement instead.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::interlink::{LinkOpportunity, LinkPlacement};

/// Caps on how many links of each kind are applied
#[derive(Debug, Clone)]
pub struct LinkCaps {
    /// Maximum internal links applied
    pub max_internal: usize,

    /// Maximum external links applied
    pub max_external: usize,
}

impl Default for LinkCaps {
    fn default() -> Self {
        Self {
            max_internal: 5,
            max_external: 3,
        }
    }
}

/// Result of applying link opportunities to content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkApplication {
    /// Content with anchors inserted
    pub content: String,

    /// Opportunities that were applied, in application order
    pub applied: Vec<LinkOpportunity>,

    /// Opportunities dropped as duplicates or over-cap
    pub skipped: Vec<LinkOpportunity>,
}

/// Apply link opportunities to a content body
///
/// Internal opportunities take priority over cluster links, which take
/// priority over external ones.
#[instrument(skip_all, fields(internal = internal.len(), cluster = cluster.len(), external = external.len()))]
pub fn apply_links(
    content: &str,
    internal: &[LinkOpportunity],
    cluster: &[LinkOpportunity],
    external: &[LinkOpportunity],
    caps: &LinkCaps,
) -> LinkApplication {
    let mut result = content.to_string();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut seen_urls: Vec<String> = Vec::new();

    let candidates = internal
        .iter()
        .take(caps.max_internal)
        .chain(cluster.iter())
        .chain(external.iter().take(caps.max_external));
    let overflow = internal
        .iter()
        .skip(caps.max_internal)
        .chain(external.iter().skip(caps.max_external));

    for opportunity in candidates {
        let url_key = opportunity.url.to_lowercase();
        if url_key.is_empty()
            || seen_urls.contains(&url_key)
            || already_linked(&result, &opportunity.url)
        {
            skipped.push(opportunity.clone());
            continue;
        }
        seen_urls.push(url_key);

        insert_link(&mut result, opportunity);
        debug!("Applied {:?} link to {}", opportunity.link_type, opportunity.url);
        applied.push(opportunity.clone());
    }
    skipped.extend(overflow.cloned());

    LinkApplication {
        content: result,
        applied,
        skipped,
    }
}

/// Whether the content already carries an anchor for this URL
fn already_linked(content: &str, url: &str) -> bool {
    let needle = format!("href=\"{}\"", url.to_lowercase());
    content.to_lowercase().contains(&needle)
}

fn insert_link(content: &mut String, opportunity: &LinkOpportunity) {
    if wrap_existing_mention(content, opportunity) {
        return;
    }
    append_reference(content, opportunity);
}

/// Wrap the first plain-text occurrence of the anchor text in an anchor
///
/// Occurrences inside a tag or inside an existing anchor are skipped.
fn wrap_existing_mention(content: &mut String, opportunity: &LinkOpportunity) -> bool {
    if opportunity.anchor_text.trim().is_empty() {
        return false;
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(&opportunity.anchor_text))
        .case_insensitive(true)
        .build()
    else {
        return false;
    };

    for found in pattern.find_iter(content) {
        if inside_tag(content, found.start()) || inside_anchor(content, found.start()) {
            continue;
        }
        let anchor = format!(
            "<a href=\"{}\">{}</a>",
            opportunity.url,
            &content[found.start()..found.end()]
        );
        content.replace_range(found.start()..found.end(), &anchor);
        return true;
    }
    false
}

/// Whether a byte position falls between `<` and `>` of a tag
fn inside_tag(content: &str, pos: usize) -> bool {
    let before = &content[..pos];
    match (before.rfind('<'), before.rfind('>')) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Whether a byte position falls inside an existing `<a>...</a>` element
fn inside_anchor(content: &str, pos: usize) -> bool {
    let before = &content[..pos].to_lowercase();
    let opens = before.matches("<a ").count() + before.matches("<a>").count();
    let closes = before.matches("</a>").count();
    opens > closes
}

/// Insert a reference line at the recommended placement
fn append_reference(content: &mut String, opportunity: &LinkOpportunity) {
    let line = format!(
        "<p>See also: <a href=\"{}\">{}</a></p>",
        opportunity.url, opportunity.anchor_text
    );

    let boundaries: Vec<usize> = content
        .match_indices("</p>")
        .map(|(i, m)| i + m.len())
        .collect();

    let insert_at = match opportunity.placement {
        LinkPlacement::Introduction => boundaries.first().copied(),
        LinkPlacement::Body => boundaries.get(boundaries.len() / 2).copied(),
        LinkPlacement::Conclusion => None,
    };

    match insert_at {
        Some(pos) => content.insert_str(pos, &line),
        None => content.push_str(&line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interlink::LinkType;

    fn opportunity(url: &str, anchor: &str, placement: LinkPlacement) -> LinkOpportunity {
        LinkOpportunity {
            url: url.to_string(),
            anchor_text: anchor.to_string(),
            relevance_score: 0.8,
            authority_score: None,
            placement,
            link_type: LinkType::Internal,
            reason: String::new(),
        }
    }

    const CONTENT: &str = "<p>Dog grooming is a craft.</p><p>Brushes matter.</p><p>The end.</p>";

    #[test]
    fn test_wraps_existing_mention() {
        let application = apply_links(
            CONTENT,
            &[opportunity("/guide", "dog grooming", LinkPlacement::Body)],
            &[],
            &[],
            &LinkCaps::default(),
        );
        assert!(
            application
                .content
                .contains("<a href=\"/guide\">Dog grooming</a>")
        );
        assert_eq!(application.applied.len(), 1);
    }

    #[test]
    fn test_appends_reference_when_anchor_absent() {
        let application = apply_links(
            CONTENT,
            &[opportunity("/other", "Totally Unrelated", LinkPlacement::Introduction)],
            &[],
            &[],
            &LinkCaps::default(),
        );
        let intro_end = application.content.find("</p>").unwrap() + 4;
        let inserted = application.content.find("See also").unwrap();
        assert_eq!(inserted, intro_end + "<p>".len());
        assert!(application.content.contains("<a href=\"/other\">Totally Unrelated</a>"));
    }

    #[test]
    fn test_deduplicates_by_url() {
        let application = apply_links(
            CONTENT,
            &[
                opportunity("/guide", "dog grooming", LinkPlacement::Body),
                opportunity("/guide", "grooming", LinkPlacement::Body),
            ],
            &[],
            &[],
            &LinkCaps::default(),
        );
        assert_eq!(application.applied.len(), 1);
        assert_eq!(application.skipped.len(), 1);
    }

    #[test]
    fn test_never_duplicates_existing_anchor() {
        let content = "<p>Read <a href=\"/guide\">dog grooming</a> basics.</p>";
        let application = apply_links(
            content,
            &[opportunity("/guide", "dog grooming", LinkPlacement::Body)],
            &[],
            &[],
            &LinkCaps::default(),
        );
        assert_eq!(application.applied.len(), 0);
        assert_eq!(application.content.matches("/guide").count(), 1);
    }

    #[test]
    fn test_text_inside_existing_anchor_not_rewrapped() {
        let content = "<p><a href=\"/old\">dog grooming</a> and more.</p>";
        let application = apply_links(
            content,
            &[opportunity("/new", "dog grooming", LinkPlacement::Conclusion)],
            &[],
            &[],
            &LinkCaps::default(),
        );
        // The mention inside the old anchor is untouched; a reference line
        // is appended instead.
        assert!(application.content.starts_with("<p><a href=\"/old\">dog grooming</a>"));
        assert!(application.content.ends_with("</a></p>"));
        assert_eq!(application.applied.len(), 1);
    }

    #[test]
    fn test_caps_enforced() {
        let internal: Vec<LinkOpportunity> = (0..10)
            .map(|i| opportunity(&format!("/page-{}", i), "no such text", LinkPlacement::Body))
            .collect();
        let external: Vec<LinkOpportunity> = (0..5)
            .map(|i| opportunity(&format!("https://ext-{}.com/", i), "nope", LinkPlacement::Body))
            .collect();

        let application = apply_links(CONTENT, &internal, &[], &external, &LinkCaps::default());
        assert_eq!(application.applied.len(), 8); // 5 internal + 3 external
        assert_eq!(application.skipped.len(), 7);
    }

    #[test]
    fn test_internal_applied_before_external() {
        let application = apply_links(
            CONTENT,
            &[opportunity("/int", "alpha", LinkPlacement::Body)],
            &[],
            &[opportunity("https://ext.com/", "beta", LinkPlacement::Body)],
            &LinkCaps::default(),
        );
        assert_eq!(application.applied[0].url, "/int");
        assert_eq!(application.applied[1].url, "https://ext.com/");
    }
}
