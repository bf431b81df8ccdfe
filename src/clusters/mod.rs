//! Topic cluster analysis
//!
//! This module groups indexed pages by shared topic and partitions each
//! group into a pillar, supporting pages, and long-tail pages, scoring the
//! cluster's authority and flagging content gaps. Clusters are rebuilt on
//! every call and never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::index::{ContentIndex, IndexedContent};

/// Minimum word count for pillar-grade content
const PILLAR_MIN_WORDS: usize = 2000;

/// Supporting pages fall within this word-count range
const SUPPORTING_RANGE: std::ops::RangeInclusive<usize> = 500..=2000;

/// Minimum topic/keyword overlap between a supporting page and its pillar
const SUPPORTING_MIN_OVERLAP: f64 = 0.3;

/// A topical grouping of indexed pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCluster {
    /// Cluster name (the shared topic)
    pub name: String,

    /// The cluster's most comprehensive page, its authority anchor
    pub pillar: Option<IndexedContent>,

    /// Medium-length pages topically close to the pillar
    pub supporting: Vec<IndexedContent>,

    /// Short or narrowly-scoped pages
    pub long_tail: Vec<IndexedContent>,

    /// Composite cluster strength in [0, 1]
    pub authority_score: f64,

    /// Detected coverage gaps
    pub content_gaps: Vec<String>,
}

/// Result of one cluster analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAnalysis {
    /// All detected clusters, ordered by topic name
    pub clusters: Vec<ContentCluster>,

    /// Number of pages that were analyzed
    pub page_count: usize,
}

impl ClusterAnalysis {
    /// Look up a cluster by topic name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&ContentCluster> {
        let lower = name.to_lowercase();
        self.clusters.iter().find(|c| c.name == lower)
    }
}

/// Jaccard overlap between two term sets, case-insensitive
///
/// `|A ∩ B| / |A ∪ B|`; defined as 0 when either set is empty.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    use std::collections::BTreeSet;

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: BTreeSet<String> = a.iter().map(|s| s.to_lowercase()).collect();
    let set_b: BTreeSet<String> = b.iter().map(|s| s.to_lowercase()).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// Group indexed pages into topic clusters
///
/// A page appears in one group per topic it carries, so a page can belong
/// to several clusters (in different roles).
#[instrument(skip(index), fields(page_count = index.len()))]
pub fn analyze_clusters(index: &ContentIndex) -> ClusterAnalysis {
    // BTreeMap keeps cluster ordering deterministic.
    let mut groups: BTreeMap<String, Vec<&IndexedContent>> = BTreeMap::new();
    for page in index.pages() {
        for topic in &page.topics {
            groups.entry(topic.to_lowercase()).or_default().push(page);
        }
    }

    let clusters = groups
        .into_iter()
        .map(|(topic, pages)| build_cluster(topic, pages))
        .collect();

    ClusterAnalysis {
        clusters,
        page_count: index.len(),
    }
}

fn build_cluster(topic: String, mut pages: Vec<&IndexedContent>) -> ContentCluster {
    // Word count descending, topic breadth descending, id ascending so the
    // selection is fully deterministic.
    pages.sort_by(|a, b| {
        b.word_count
            .cmp(&a.word_count)
            .then_with(|| b.topics.len().cmp(&a.topics.len()))
            .then_with(|| a.page_id.cmp(&b.page_id))
    });

    let top_words = pages.first().map(|p| p.word_count).unwrap_or(0);
    let threshold = (top_words as f64 * 0.8).max(PILLAR_MIN_WORDS as f64);

    let pillar = pages
        .iter()
        .find(|p| p.word_count as f64 >= threshold)
        .or(pages.first())
        .map(|p| (*p).clone());

    let mut supporting = Vec::new();
    let mut long_tail = Vec::new();
    if let Some(pillar_page) = &pillar {
        for page in &pages {
            if page.page_id == pillar_page.page_id {
                continue;
            }
            let overlap = jaccard(&page.topics, &pillar_page.topics)
                .max(jaccard(&page.keywords, &pillar_page.keywords));
            if SUPPORTING_RANGE.contains(&page.word_count) && overlap > SUPPORTING_MIN_OVERLAP {
                supporting.push((*page).clone());
            } else if page.word_count < 1000 || page.topics.len() == 1 {
                long_tail.push((*page).clone());
            }
        }
    }

    let authority_score = authority(pillar.as_ref(), supporting.len(), long_tail.len());
    let content_gaps = detect_gaps(&topic, &pages);

    debug!(
        "Cluster '{}': {} supporting, {} long-tail, authority {:.2}",
        topic,
        supporting.len(),
        long_tail.len(),
        authority_score
    );

    ContentCluster {
        name: topic,
        pillar,
        supporting,
        long_tail,
        authority_score,
        content_gaps,
    }
}

/// Composite cluster authority in [0, 1]
///
/// Pillar strength contributes up to 0.7, supporting breadth up to 0.3,
/// long-tail breadth up to 0.2; the sum is clamped to 1.0.
fn authority(pillar: Option<&IndexedContent>, supporting: usize, long_tail: usize) -> f64 {
    let mut score = 0.0;
    if let Some(pillar) = pillar {
        score += 0.5;
        if pillar.word_count > 3000 {
            score += 0.1;
        }
        if pillar.topics.len() > 3 {
            score += 0.1;
        }
    }
    score += (supporting as f64 * 0.05).min(0.3);
    score += (long_tail as f64 * 0.02).min(0.2);
    score.clamp(0.0, 1.0)
}

/// Flag a missing pillar and topics only a single page covers
fn detect_gaps(cluster_topic: &str, pages: &[&IndexedContent]) -> Vec<String> {
    let mut gaps = Vec::new();

    if pages.iter().all(|p| p.word_count < PILLAR_MIN_WORDS) {
        gaps.push(format!(
            "No pillar-grade content for '{}': every page is under {} words",
            cluster_topic, PILLAR_MIN_WORDS
        ));
    }

    let mut coverage: BTreeMap<String, usize> = BTreeMap::new();
    for page in pages {
        for topic in &page.topics {
            *coverage.entry(topic.to_lowercase()).or_insert(0) += 1;
        }
    }
    for (topic, count) in coverage {
        if topic != cluster_topic && count == 1 {
            gaps.push(format!("Only one page covers related topic '{}'", topic));
        }
    }

    gaps
}
