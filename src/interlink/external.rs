//! External authority-link discovery
//!
//! Suggests authority, citation, and resource links from a curated
//! topic-category → domain table. The table is injected configuration, not
//! an inline constant, so it can be versioned and extended without touching
//! the scoring logic. Topic categorization goes through an explicit
//! [`TopicCategory`] classifier rather than ad-hoc string matching at call
//! sites.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::interlink::{DraftContent, LinkOpportunity, LinkPlacement, LinkType};

/// Fixed score tuple for authority links
const AUTHORITY_SCORES: (f64, f64) = (0.7, 0.9);

/// Fixed score tuple for general citation links
const CITATION_SCORES: (f64, f64) = (0.6, 0.95);

/// Fixed score tuple for health-specific citation links
const HEALTH_CITATION_SCORES: (f64, f64) = (0.7, 0.95);

/// Fixed score tuple for resource links
const RESOURCE_SCORES: (f64, f64) = (0.5, 0.7);

/// Topic category for external-link lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    /// Software, hardware, engineering
    Technology,
    /// Companies, finance, strategy
    Business,
    /// SEO, advertising, growth
    Marketing,
    /// Medicine, wellness, fitness
    Health,
    /// Teaching, learning, training
    Education,
    /// Everything else
    General,
}

impl TopicCategory {
    /// Classify a free-form topic string into a category
    ///
    /// Matches against a fixed list of category cue words; the first
    /// category with a matching cue wins, `General` otherwise.
    pub fn classify(topic: &str) -> TopicCategory {
        const CUES: &[(TopicCategory, &[&str])] = &[
            (
                TopicCategory::Technology,
                &["tech", "software", "programming", "code", "computer", "digital", "data", "cyber"],
            ),
            (
                TopicCategory::Business,
                &["business", "finance", "startup", "entrepreneur", "management", "sales"],
            ),
            (
                TopicCategory::Marketing,
                &["marketing", "seo", "advertis", "brand", "social media", "content strategy"],
            ),
            (
                TopicCategory::Health,
                &["health", "medical", "wellness", "fitness", "nutrition", "diet", "therapy"],
            ),
            (
                TopicCategory::Education,
                &["education", "learning", "teaching", "course", "school", "training", "study"],
            ),
        ];

        let lower = topic.to_lowercase();
        for (category, cues) in CUES {
            if cues.iter().any(|cue| lower.contains(cue)) {
                return *category;
            }
        }
        TopicCategory::General
    }
}

/// A curated domain with a display name for anchor text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityDomain {
    /// Domain, e.g. "nih.gov"
    pub domain: String,

    /// Display name used as anchor text
    pub name: String,
}

impl AuthorityDomain {
    fn new(domain: &str, name: &str) -> Self {
        Self {
            domain: domain.to_string(),
            name: name.to_string(),
        }
    }

    fn url(&self) -> String {
        format!("https://{}/", self.domain)
    }
}

/// Injected knowledge table of curated external domains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityTable {
    /// High-authority domains per topic category
    pub authority: BTreeMap<TopicCategory, Vec<AuthorityDomain>>,

    /// General research-citation sources
    pub citations: Vec<AuthorityDomain>,

    /// Citation sources used only for health topics
    pub health_citations: Vec<AuthorityDomain>,

    /// General resource domains
    pub resources: Vec<AuthorityDomain>,
}

impl Default for AuthorityTable {
    fn default() -> Self {
        let mut authority = BTreeMap::new();
        authority.insert(
            TopicCategory::Technology,
            vec![
                AuthorityDomain::new("arstechnica.com", "Ars Technica"),
                AuthorityDomain::new("wired.com", "Wired"),
                AuthorityDomain::new("ieee.org", "IEEE"),
            ],
        );
        authority.insert(
            TopicCategory::Business,
            vec![
                AuthorityDomain::new("hbr.org", "Harvard Business Review"),
                AuthorityDomain::new("forbes.com", "Forbes"),
                AuthorityDomain::new("bloomberg.com", "Bloomberg"),
            ],
        );
        authority.insert(
            TopicCategory::Marketing,
            vec![
                AuthorityDomain::new("moz.com", "Moz"),
                AuthorityDomain::new("searchengineland.com", "Search Engine Land"),
                AuthorityDomain::new("hubspot.com", "HubSpot"),
            ],
        );
        authority.insert(
            TopicCategory::Health,
            vec![
                AuthorityDomain::new("nih.gov", "National Institutes of Health"),
                AuthorityDomain::new("mayoclinic.org", "Mayo Clinic"),
                AuthorityDomain::new("who.int", "World Health Organization"),
            ],
        );
        authority.insert(
            TopicCategory::Education,
            vec![
                AuthorityDomain::new("edutopia.org", "Edutopia"),
                AuthorityDomain::new("khanacademy.org", "Khan Academy"),
            ],
        );
        authority.insert(
            TopicCategory::General,
            vec![
                AuthorityDomain::new("wikipedia.org", "Wikipedia"),
                AuthorityDomain::new("britannica.com", "Encyclopaedia Britannica"),
            ],
        );

        Self {
            authority,
            citations: vec![
                AuthorityDomain::new("nature.com", "Nature"),
                AuthorityDomain::new("sciencedirect.com", "ScienceDirect"),
                AuthorityDomain::new("scholar.google.com", "Google Scholar"),
            ],
            health_citations: vec![
                AuthorityDomain::new("pubmed.ncbi.nlm.nih.gov", "PubMed"),
                AuthorityDomain::new("nejm.org", "The New England Journal of Medicine"),
            ],
            resources: vec![
                AuthorityDomain::new("wikipedia.org", "Wikipedia"),
                AuthorityDomain::new("youtube.com", "YouTube"),
            ],
        }
    }
}

/// Options for external link discovery
#[derive(Debug, Clone)]
pub struct ExternalLinkOptions {
    /// Maximum opportunities to emit overall
    pub max_links: usize,
}

impl Default for ExternalLinkOptions {
    fn default() -> Self {
        Self { max_links: 3 }
    }
}

/// Result of external link discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalLinkAnalysis {
    /// Ranked opportunities, strongest first
    pub opportunities: Vec<LinkOpportunity>,

    /// Categories the draft's topics matched
    pub categories: Vec<TopicCategory>,
}

/// Discover external authority, citation, and resource links for a draft
///
/// Independent of any crawl: everything comes from the injected table.
/// Per topic: up to 2 authority links, up to 2 citation links
/// (health-specific sources only when a health topic is present), and up
/// to 1 resource link. Globally sorted by relevance + authority and
/// truncated to `max_links`.
#[instrument(skip(draft, table, options), fields(topic_count = draft.topics.len()))]
pub fn find_external_links(
    draft: &DraftContent,
    table: &AuthorityTable,
    options: &ExternalLinkOptions,
) -> ExternalLinkAnalysis {
    let mut opportunities: Vec<LinkOpportunity> = Vec::new();
    let mut categories: Vec<TopicCategory> = Vec::new();
    let mut seen_domains: Vec<String> = Vec::new();

    let mut push = |opportunities: &mut Vec<LinkOpportunity>,
                    seen: &mut Vec<String>,
                    domain: &AuthorityDomain,
                    scores: (f64, f64),
                    link_type_reason: String| {
        if seen.contains(&domain.domain) {
            return;
        }
        seen.push(domain.domain.clone());
        opportunities.push(LinkOpportunity {
            url: domain.url(),
            anchor_text: domain.name.clone(),
            relevance_score: scores.0,
            authority_score: Some(scores.1),
            placement: LinkPlacement::Body,
            link_type: LinkType::External,
            reason: link_type_reason,
        });
    };

    let health_detected = draft
        .topics
        .iter()
        .any(|t| TopicCategory::classify(t) == TopicCategory::Health);

    for topic in &draft.topics {
        let category = TopicCategory::classify(topic);
        if !categories.contains(&category) {
            categories.push(category);
        }

        if let Some(domains) = table.authority.get(&category) {
            for domain in domains.iter().take(2) {
                push(
                    &mut opportunities,
                    &mut seen_domains,
                    domain,
                    AUTHORITY_SCORES,
                    format!("High-authority source for '{}' ({:?})", topic, category),
                );
            }
        }

        let (citation_sources, citation_scores) = if health_detected {
            (&table.health_citations, HEALTH_CITATION_SCORES)
        } else {
            (&table.citations, CITATION_SCORES)
        };
        for domain in citation_sources.iter().take(2) {
            push(
                &mut opportunities,
                &mut seen_domains,
                domain,
                citation_scores,
                format!("Research citation for '{}'", topic),
            );
        }

        if let Some(domain) = table.resources.first() {
            push(
                &mut opportunities,
                &mut seen_domains,
                domain,
                RESOURCE_SCORES,
                format!("Reference resource for '{}'", topic),
            );
        }
    }

    opportunities.sort_by(|a, b| b.rank_weight().total_cmp(&a.rank_weight()));
    opportunities.truncate(options.max_links);

    debug!(
        "Found {} external opportunities across {} categories",
        opportunities.len(),
        categories.len()
    );

    ExternalLinkAnalysis {
        opportunities,
        categories,
    }
}
