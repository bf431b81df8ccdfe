//! Internal link recommendation engine
//!
//! Scores every indexed page for relevance to a draft using keyword and
//! topic overlap, with keyword overlap weighted higher than generic topic
//! similarity. An optional deep pass lazy-loads full page content for only
//! the strongest shallow candidates before re-scoring, which bounds the
//! expensive work to a fixed candidate budget. The shallow overlap formula
//! is the authoritative relevance contract; the deep pass only refines
//! ordering.

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::clients::SiteContentRepository;
use crate::clusters::{ClusterAnalysis, jaccard};
use crate::index::{ContentIndex, IndexedContent};
use crate::interlink::{DraftContent, InterlinkError, LinkOpportunity, LinkPlacement, LinkType};
use crate::text;

/// Weight of keyword overlap in the shallow relevance score
const KEYWORD_WEIGHT: f64 = 0.7;

/// Weight of topic overlap in the shallow relevance score
const TOPIC_WEIGHT: f64 = 0.3;

/// Weight the shallow score keeps after a deep re-score
const DEEP_SHALLOW_WEIGHT: f64 = 0.7;

/// Options for internal link analysis
#[derive(Debug, Clone)]
pub struct InterlinkOptions {
    /// Maximum opportunities to emit
    pub max_internal_links: usize,

    /// Opportunities scoring below this are discarded
    pub min_relevance_score: f64,

    /// Number of shallow candidates the deep pass re-scores
    pub deep_candidates: usize,
}

impl Default for InterlinkOptions {
    fn default() -> Self {
        Self {
            max_internal_links: 5,
            min_relevance_score: 0.3,
            deep_candidates: 10,
        }
    }
}

/// Rank internal link opportunities for a draft using shallow scoring only
///
/// # Returns
///
/// Opportunities above the relevance threshold, sorted by descending
/// relevance and capped at `max_internal_links`.
#[instrument(skip(draft, index, options), fields(candidates = index.len()))]
pub fn analyze_interlinking(
    draft: &DraftContent,
    index: &ContentIndex,
    options: &InterlinkOptions,
) -> Vec<LinkOpportunity> {
    let mut scored: Vec<(f64, &IndexedContent)> = index
        .pages()
        .iter()
        .map(|page| (shallow_score(draft, page), page))
        .collect();

    rank_and_build(draft, &mut scored, options)
}

/// Rank internal link opportunities with a deep second pass
///
/// The top `deep_candidates` pages by shallow score get their full content
/// loaded and re-scored; pages whose content cannot be loaded keep their
/// shallow score.
#[instrument(skip(draft, index, options, repository), fields(candidates = index.len()))]
pub async fn analyze_interlinking_deep<R: SiteContentRepository>(
    draft: &DraftContent,
    index: &ContentIndex,
    options: &InterlinkOptions,
    repository: &R,
) -> Result<Vec<LinkOpportunity>, InterlinkError> {
    let mut scored: Vec<(f64, &IndexedContent)> = index
        .pages()
        .iter()
        .map(|page| (shallow_score(draft, page), page))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    // Content loads are independent of each other, so fetch the whole
    // candidate budget concurrently.
    let loads = scored
        .iter()
        .take(options.deep_candidates)
        .map(|(_, page)| repository.get_item_content(&page.page_id));
    let contents = join_all(loads).await;

    for (entry, loaded) in scored.iter_mut().zip(contents) {
        match loaded {
            Ok(content) => {
                let deep = deep_component(draft, &content);
                entry.0 = DEEP_SHALLOW_WEIGHT * entry.0 + (1.0 - DEEP_SHALLOW_WEIGHT) * deep;
                debug!("Deep re-score for {}: {:.3}", entry.1.url, entry.0);
            }
            Err(e) => {
                warn!("Deep analysis skipped for {}: {}", entry.1.url, e);
            }
        }
    }

    Ok(rank_and_build(draft, &mut scored, options))
}

/// Emit cluster-pillar opportunities for the draft's topics
pub fn cluster_opportunities(
    draft: &DraftContent,
    analysis: &ClusterAnalysis,
    max_links: usize,
) -> Vec<LinkOpportunity> {
    let mut opportunities = Vec::new();
    for topic in &draft.topics {
        let Some(cluster) = analysis.get(topic) else {
            continue;
        };
        let Some(pillar) = &cluster.pillar else {
            continue;
        };
        opportunities.push(LinkOpportunity {
            url: pillar.url.clone(),
            anchor_text: pillar.title.clone(),
            relevance_score: (0.4 + 0.4 * cluster.authority_score).clamp(0.0, 1.0),
            authority_score: None,
            placement: LinkPlacement::Body,
            link_type: LinkType::Cluster,
            reason: format!("Pillar page for the '{}' topic cluster", cluster.name),
        });
        if opportunities.len() == max_links {
            break;
        }
    }
    opportunities
}

/// Shallow relevance: weighted keyword and topic overlap, in [0, 1]
fn shallow_score(draft: &DraftContent, page: &IndexedContent) -> f64 {
    let keyword_overlap = jaccard(&draft.keywords, &page.keywords);
    let topic_overlap = jaccard(&draft.topics, &page.topics);
    KEYWORD_WEIGHT * keyword_overlap + TOPIC_WEIGHT * topic_overlap
}

/// Deep component: fraction of draft keywords present in the page body
fn deep_component(draft: &DraftContent, page_content: &str) -> f64 {
    if draft.keywords.is_empty() {
        return 0.0;
    }
    let plain = text::strip_html(page_content);
    let present = draft
        .keywords
        .iter()
        .filter(|kw| text::contains_ignore_case(&plain, kw))
        .count();
    present as f64 / draft.keywords.len() as f64
}

fn rank_and_build(
    draft: &DraftContent,
    scored: &mut Vec<(f64, &IndexedContent)>,
    options: &InterlinkOptions,
) -> Vec<LinkOpportunity> {
    scored.retain(|(score, _)| *score >= options.min_relevance_score);
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.page_id.cmp(&b.1.page_id)));
    scored.truncate(options.max_internal_links);

    let count = scored.len();
    scored
        .iter()
        .enumerate()
        .map(|(rank, (score, page))| {
            let placement = placement_for_rank(rank, count);
            let shared_keywords = draft
                .keywords
                .iter()
                .filter(|kw| {
                    page.keywords
                        .iter()
                        .any(|pk| pk.eq_ignore_ascii_case(kw))
                })
                .count();
            LinkOpportunity {
                url: page.url.clone(),
                anchor_text: page.title.clone(),
                relevance_score: score.clamp(0.0, 1.0),
                authority_score: None,
                placement,
                link_type: LinkType::Internal,
                reason: format!(
                    "Shares {} keyword(s) with '{}' (relevance {:.2})",
                    shared_keywords, page.title, score
                ),
            }
        })
        .collect()
}

/// The strongest match goes early, the weakest closes the article
fn placement_for_rank(rank: usize, count: usize) -> LinkPlacement {
    if rank == 0 {
        LinkPlacement::Introduction
    } else if count > 2 && rank == count - 1 {
        LinkPlacement::Conclusion
    } else {
        LinkPlacement::Body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::MockSiteRepository;
    use crate::crawler::CrawledPage;
    use crate::index::index_content;

    fn draft(keywords: &[&str], topics: &[&str]) -> DraftContent {
        DraftContent {
            content: "<p>draft body</p>".to_string(),
            title: "Draft".to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            topics: topics.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn indexed(pages: Vec<(&str, &[&str], &[&str])>) -> ContentIndex {
        let crawled: Vec<CrawledPage> = pages
            .into_iter()
            .map(|(id, keywords, topics)| CrawledPage {
                id: id.to_string(),
                url: format!("https://example.com/{}", id),
                title: format!("Page {}", id),
                content: String::new(),
                excerpt: None,
                word_count: 800,
                keywords: keywords.iter().map(|s| s.to_string()).collect(),
                topics: topics.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        index_content(&crawled)
    }

    #[test]
    fn test_threshold_filters_weak_candidates() {
        let index = indexed(vec![
            ("match", &["grooming", "dogs"], &["grooming"]),
            ("weak", &["finance"], &["stocks"]),
        ]);
        let opportunities = analyze_interlinking(
            &draft(&["grooming", "dogs"], &["grooming"]),
            &index,
            &InterlinkOptions::default(),
        );
        assert_eq!(opportunities.len(), 1);
        assert!(opportunities[0].url.ends_with("/match"));
    }

    #[test]
    fn test_cap_enforced_with_ranking() {
        // Ten candidates all above the threshold; only five survive, in
        // descending relevance order.
        let keyword_sets: Vec<Vec<String>> = (0..10)
            .map(|i| {
                let mut set = vec!["grooming".to_string(), "dogs".to_string()];
                for j in 0..i {
                    set.push(format!("filler{}", j));
                }
                set
            })
            .collect();
        let crawled: Vec<CrawledPage> = keyword_sets
            .into_iter()
            .enumerate()
            .map(|(i, keywords)| CrawledPage {
                id: format!("p{:02}", i),
                url: format!("https://example.com/p{:02}", i),
                title: format!("Page {}", i),
                content: String::new(),
                excerpt: None,
                word_count: 800,
                keywords,
                topics: vec!["grooming".to_string()],
            })
            .collect();
        let index = index_content(&crawled);

        let opportunities = analyze_interlinking(
            &draft(&["grooming", "dogs"], &["grooming"]),
            &index,
            &InterlinkOptions::default(),
        );

        assert_eq!(opportunities.len(), 5);
        for pair in opportunities.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        // Fewer filler keywords means higher Jaccard overlap.
        assert!(opportunities[0].url.ends_with("/p00"));
    }

    #[test]
    fn test_placement_assignment() {
        let index = indexed(vec![
            ("a", &["grooming", "dogs"], &["grooming"]),
            ("b", &["grooming", "cats"], &["grooming"]),
            ("c", &["grooming", "birds"], &["grooming"]),
        ]);
        let opportunities = analyze_interlinking(
            &draft(&["grooming"], &["grooming"]),
            &index,
            &InterlinkOptions::default(),
        );
        assert_eq!(opportunities.len(), 3);
        assert_eq!(opportunities[0].placement, LinkPlacement::Introduction);
        assert_eq!(opportunities[1].placement, LinkPlacement::Body);
        assert_eq!(opportunities[2].placement, LinkPlacement::Conclusion);
    }

    #[test]
    fn test_scores_bounded() {
        let index = indexed(vec![("a", &["grooming"], &["grooming"])]);
        let opportunities = analyze_interlinking(
            &draft(&["grooming"], &["grooming"]),
            &index,
            &InterlinkOptions::default(),
        );
        for opportunity in &opportunities {
            assert!((0.0..=1.0).contains(&opportunity.relevance_score));
        }
    }

    #[tokio::test]
    async fn test_deep_pass_prefers_pages_mentioning_draft_keywords() {
        let index = indexed(vec![
            ("mentions", &["grooming", "dogs"], &["grooming"]),
            ("silent", &["grooming", "dogs"], &["grooming"]),
        ]);
        let repo = MockSiteRepository::new()
            .with_item_content("mentions", "<p>All about dog grooming and dogs.</p>")
            .with_item_content("silent", "<p>Nothing relevant here.</p>");

        let opportunities = analyze_interlinking_deep(
            &draft(&["grooming", "dogs"], &["grooming"]),
            &index,
            &InterlinkOptions::default(),
            &repo,
        )
        .await
        .unwrap();

        assert_eq!(opportunities.len(), 2);
        assert!(opportunities[0].url.ends_with("/mentions"));
        assert!(opportunities[0].relevance_score > opportunities[1].relevance_score);
    }

    #[tokio::test]
    async fn test_deep_pass_load_failure_keeps_shallow_score() {
        let index = indexed(vec![("missing", &["grooming"], &["grooming"])]);
        let repo = MockSiteRepository::new(); // no content registered
        let opportunities = analyze_interlinking_deep(
            &draft(&["grooming"], &["grooming"]),
            &index,
            &InterlinkOptions::default(),
            &repo,
        )
        .await
        .unwrap();
        assert_eq!(opportunities.len(), 1);
    }

    #[test]
    fn test_cluster_opportunities_point_at_pillars() {
        let crawled = vec![
            CrawledPage {
                id: "pillar".to_string(),
                url: "https://example.com/pillar".to_string(),
                title: "The Grooming Pillar".to_string(),
                content: String::new(),
                excerpt: None,
                word_count: 2500,
                keywords: vec!["grooming".to_string()],
                topics: vec!["grooming".to_string()],
            },
        ];
        let analysis = crate::clusters::analyze_clusters(&index_content(&crawled));
        let opportunities =
            cluster_opportunities(&draft(&["grooming"], &["grooming"]), &analysis, 3);
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].link_type, LinkType::Cluster);
        assert_eq!(opportunities[0].url, "https://example.com/pillar");
    }
}
