//! Interlinking module
//!
//! This module scores candidate link targets for a draft article and weaves
//! the winners into the content: internal links against the site's content
//! index, external authority/citation/resource links from a curated domain
//! table, and cluster links pointing at pillar pages.

mod apply;
mod engine;
mod error;
mod external;

pub use apply::{LinkApplication, LinkCaps, apply_links};
pub use engine::{
    InterlinkOptions, analyze_interlinking, analyze_interlinking_deep, cluster_opportunities,
};
pub use error::InterlinkError;
pub use external::{
    AuthorityDomain, AuthorityTable, ExternalLinkAnalysis, ExternalLinkOptions, TopicCategory,
    find_external_links,
};

use serde::{Deserialize, Serialize};

/// Kind of link an opportunity represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Link to another page on the same site
    Internal,
    /// Link to an external authority, citation, or resource
    External,
    /// Link to a topic cluster's pillar page
    Cluster,
}

/// Where in the content a link should land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPlacement {
    /// Early, inside the opening section
    Introduction,
    /// Anywhere in the main body
    Body,
    /// In the closing section
    Conclusion,
}

/// A candidate hyperlink for a draft article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkOpportunity {
    /// Target URL (never empty)
    pub url: String,

    /// Anchor text to use
    pub anchor_text: String,

    /// Topical relevance to the draft, in [0, 1]
    pub relevance_score: f64,

    /// Domain trust weight in [0, 1]; external links only
    pub authority_score: Option<f64>,

    /// Recommended placement
    pub placement: LinkPlacement,

    /// Kind of link
    pub link_type: LinkType,

    /// Human-readable justification
    pub reason: String,
}

impl LinkOpportunity {
    /// Combined ranking weight (relevance plus authority when present)
    pub fn rank_weight(&self) -> f64 {
        self.relevance_score + self.authority_score.unwrap_or(0.0)
    }
}

/// A draft article being analyzed for link opportunities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftContent {
    /// HTML content body
    pub content: String,

    /// Draft title
    pub title: String,

    /// Keywords the draft targets
    pub keywords: Vec<String>,

    /// Topics the draft covers
    pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_weight_includes_authority() {
        let opportunity = LinkOpportunity {
            url: "https://example.com".to_string(),
            anchor_text: "example".to_string(),
            relevance_score: 0.7,
            authority_score: Some(0.9),
            placement: LinkPlacement::Body,
            link_type: LinkType::External,
            reason: String::new(),
        };
        assert!((opportunity.rank_weight() - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_placement_serialization() {
        assert_eq!(
            serde_json::to_string(&LinkPlacement::Introduction).unwrap(),
            "\"introduction\""
        );
    }
}
