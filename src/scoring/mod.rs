//! Content quality scoring module
//!
//! This module provides the deterministic content scorer: a pure function
//! from an HTML body (plus optional metadata) to readability, SEO, quality,
//! engagement, accessibility, and authority scores, structural facts, and
//! threshold-driven recommendations. No network calls are made; scoring the
//! same content twice yields the same result.

mod error;
mod readability;
mod seo;
mod signals;

pub use error::ScoreError;
pub use readability::flesch_reading_ease;
pub use seo::{SeoInputs, keyword_density, seo_score};
pub use signals::{ContentSignals, extract_signals};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::text;

/// Metadata accompanying a content body for analysis
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    /// Page title, if one exists yet
    pub title: Option<String>,

    /// Meta description, if one exists yet
    pub meta_description: Option<String>,

    /// Keywords the content should cover
    pub keywords: Vec<String>,

    /// Primary keyword the content targets
    pub target_keyword: Option<String>,

    /// Whether a featured image is attached
    pub has_featured_image: bool,
}

/// Scoring of one content body
///
/// All six scores are integers in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysisResult {
    /// Flesch Reading Ease, clamped to [0, 100]
    pub readability_score: u8,

    /// On-page SEO point-budget score
    pub seo_score: u8,

    /// Blend of readability, SEO, and structural completeness
    pub quality_score: u8,

    /// Scannability and media-richness heuristic
    pub engagement_score: u8,

    /// Alt text and document-structure heuristic
    pub accessibility_score: u8,

    /// Depth, citations, and media heuristic (E-E-A-T proxy)
    pub authority_score: u8,

    /// Number of words in the plain text
    pub word_count: usize,

    /// Number of H1-H3 headings
    pub heading_count: usize,

    /// Number of hyperlinks
    pub link_count: usize,

    /// Number of images
    pub image_count: usize,

    /// Density (percent of words) per requested keyword
    pub keyword_density: BTreeMap<String, f64>,

    /// Requested keywords that never appear in the content
    pub missing_keywords: Vec<String>,

    /// Human-readable improvement recommendations
    pub recommendations: Vec<String>,
}

/// Analyze a content body and compute all scoring dimensions
///
/// # Arguments
///
/// * `content` - The HTML content body
/// * `request` - Optional metadata (title, meta description, keywords)
///
/// # Returns
///
/// A [`ContentAnalysisResult`] with every score in [0, 100]
#[instrument(skip(content, request), fields(content_len = content.len()))]
pub fn analyze(content: &str, request: &AnalyzeRequest) -> Result<ContentAnalysisResult, ScoreError> {
    let signals = extract_signals(content)?;

    let readability = flesch_reading_ease(&signals.plain_text);
    let seo = seo_score(
        &signals,
        &SeoInputs {
            title: request.title.as_deref(),
            meta_description: request.meta_description.as_deref(),
            target_keyword: request.target_keyword.as_deref(),
            has_featured_image: request.has_featured_image,
        },
    );
    let quality = quality_score(readability, seo, &signals);
    let engagement = engagement_score(&signals);
    let accessibility = accessibility_score(&signals);
    let authority = authority_score(&signals);

    let mut keyword_densities = BTreeMap::new();
    let mut missing_keywords = Vec::new();
    for keyword in &request.keywords {
        let density = keyword_density(&signals.plain_text, signals.word_count, keyword);
        if density == 0.0 {
            missing_keywords.push(keyword.clone());
        }
        keyword_densities.insert(keyword.clone(), density);
    }

    let recommendations = recommend(readability, request, &signals, &missing_keywords);

    debug!(
        readability,
        seo, quality, engagement, accessibility, authority, "scored content"
    );

    Ok(ContentAnalysisResult {
        readability_score: readability,
        seo_score: seo,
        quality_score: quality,
        engagement_score: engagement,
        accessibility_score: accessibility,
        authority_score: authority,
        word_count: signals.word_count,
        heading_count: signals.heading_count(),
        link_count: signals.link_count,
        image_count: signals.image_count,
        keyword_density: keyword_densities,
        missing_keywords,
        recommendations,
    })
}

/// 60% readability/SEO average, 40% structural completeness
fn quality_score(readability: u8, seo: u8, signals: &ContentSignals) -> u8 {
    let structural = (signals.heading_count() as f64 * 7.5).min(30.0)
        + (signals.link_count as f64 * 5.0).min(20.0)
        + (signals.image_count as f64 * 7.0).min(20.0)
        + (signals.word_count as f64 / 2000.0 * 30.0).min(30.0);

    let blended = 0.6 * f64::from(readability + seo) / 2.0 + 0.4 * structural;
    blended.round().clamp(0.0, 100.0) as u8
}

/// Scannability heuristic: section density, media, links, length
fn engagement_score(signals: &ContentSignals) -> u8 {
    let mut score: f64 = 0.0;

    if signals.word_count >= 300 {
        score += 15.0;
    }
    if signals.word_count >= 1000 {
        score += 10.0;
    }

    // Roughly one heading per 300 words keeps long content scannable.
    if signals.word_count > 0 {
        let sections_needed = (signals.word_count as f64 / 300.0).ceil();
        if signals.heading_count() as f64 >= sections_needed {
            score += 25.0;
        } else if signals.heading_count() > 0 {
            score += 12.0;
        }
    }

    if signals.image_count >= 1 {
        score += 20.0;
    }
    if signals.image_count >= 3 {
        score += 10.0;
    }
    if signals.link_count >= 2 {
        score += 15.0;
    }
    if signals.sentence_count > 0 && signals.avg_sentence_length() <= 20.0 {
        score += 5.0;
    }

    score.round().clamp(0.0, 100.0) as u8
}

/// Alt coverage and document structure heuristic
fn accessibility_score(signals: &ContentSignals) -> u8 {
    let mut score = signals.alt_coverage() * 40.0;

    if signals.h1_count == 1 {
        score += 20.0;
    }
    if signals.h2_count >= 1 {
        score += 15.0;
    }
    if signals.sentence_count > 0 {
        if signals.avg_sentence_length() < 25.0 {
            score += 25.0;
        } else {
            score += 10.0;
        }
    }

    score.round().clamp(0.0, 100.0) as u8
}

/// E-E-A-T proxy: depth, citations, structure, media richness
fn authority_score(signals: &ContentSignals) -> u8 {
    let links = if signals.link_count >= 3 {
        30.0
    } else {
        signals.link_count as f64 * 10.0
    };
    let depth = (signals.word_count as f64 / 1500.0 * 30.0).min(30.0);
    let structure = (signals.heading_count() as f64 * 5.0).min(20.0);
    let media = (signals.image_count as f64 * 10.0).min(20.0);

    (links + depth + structure + media).round().clamp(0.0, 100.0) as u8
}

/// Generate improvement recommendations from threshold checks
fn recommend(
    readability: u8,
    request: &AnalyzeRequest,
    signals: &ContentSignals,
    missing_keywords: &[String],
) -> Vec<String> {
    let mut recs = Vec::new();

    if readability < 60 {
        recs.push("Simplify sentences and use shorter words to improve readability".to_string());
    }
    if request.meta_description.is_none() {
        recs.push("Add a meta description of 120-160 characters".to_string());
    }
    if signals.word_count < 500 {
        recs.push("Expand the content to at least 500 words".to_string());
    }
    if request.keywords.is_empty() {
        recs.push("Provide a keyword list to track coverage".to_string());
    }
    if !missing_keywords.is_empty() {
        recs.push(format!(
            "Work these keywords into the content: {}",
            missing_keywords.join(", ")
        ));
    }
    if signals.h1_count != 1 {
        recs.push("Use exactly one H1 heading".to_string());
    }
    if signals.h2_count < 2 {
        recs.push("Break the content into sections with H2 headings".to_string());
    }
    if signals.image_count == 0 {
        recs.push("Add at least one image with alt text".to_string());
    } else if signals.alt_coverage() < 1.0 {
        recs.push("Add alt text to every image".to_string());
    }
    if signals.link_count < 3 {
        recs.push("Link to at least three related pages or sources".to_string());
    }
    if let Some(title) = &request.title {
        let len = title.chars().count();
        if !(30..=60).contains(&len) {
            recs.push("Keep the title between 30 and 60 characters".to_string());
        }
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_body() -> String {
        let mut html = String::from(
            "<h1>Pet Grooming</h1><p>Grooming keeps pets healthy. It is easy to start.</p>\
             <h2>Tools</h2><p>Use a brush. Use a comb. ",
        );
        for _ in 0..200 {
            html.push_str("Groom the dog gently and often. ");
        }
        html.push_str(
            "</p><h2>Routine</h2><h3>Weekly</h3><p>See \
             <a href=\"/a\">this</a>, <a href=\"/b\">this</a>, and <a href=\"/c\">this</a>.</p>\
             <img src=\"x.png\" alt=\"a dog\">",
        );
        html
    }

    #[test]
    fn test_all_scores_bounded() {
        let bodies = ["", "<p>tiny</p>", &rich_body()];
        for body in bodies {
            let result = analyze(
                body,
                &AnalyzeRequest {
                    title: Some("Best Pet Grooming Services".to_string()),
                    keywords: vec!["pet grooming".to_string(), "dog grooming".to_string()],
                    target_keyword: Some("pet grooming".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

            for score in [
                result.readability_score,
                result.seo_score,
                result.quality_score,
                result.engagement_score,
                result.accessibility_score,
                result.authority_score,
            ] {
                assert!(score <= 100, "score {} out of bounds for {:?}", score, body);
            }
        }
    }

    #[test]
    fn test_missing_keywords_detected() {
        let result = analyze(
            "<p>All about cats and nothing else.</p>",
            &AnalyzeRequest {
                keywords: vec!["cats".to_string(), "dog grooming".to_string()],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(result.missing_keywords, vec!["dog grooming"]);
        assert!(result.keyword_density["cats"] > 0.0);
        assert_eq!(result.keyword_density["dog grooming"], 0.0);
    }

    #[test]
    fn test_recommendations_for_thin_content() {
        let result = analyze("<p>Too short.</p>", &AnalyzeRequest::default()).unwrap();
        assert!(
            result
                .recommendations
                .iter()
                .any(|r| r.contains("500 words"))
        );
        assert!(result.recommendations.iter().any(|r| r.contains("H1")));
    }

    #[test]
    fn test_rich_content_scores_better_than_thin() {
        let request = AnalyzeRequest {
            title: Some("The Complete Guide to Pet Grooming at Home".to_string()),
            target_keyword: Some("pet grooming".to_string()),
            has_featured_image: true,
            ..Default::default()
        };
        let rich = analyze(&rich_body(), &request).unwrap();
        let thin = analyze("<p>Pets.</p>", &request).unwrap();
        assert!(rich.quality_score > thin.quality_score);
        assert!(rich.seo_score > thin.seo_score);
    }

    #[test]
    fn test_deterministic() {
        let request = AnalyzeRequest {
            keywords: vec!["grooming".to_string()],
            ..Default::default()
        };
        let a = analyze(&rich_body(), &request).unwrap();
        let b = analyze(&rich_body(), &request).unwrap();
        assert_eq!(a.quality_score, b.quality_score);
        assert_eq!(a.keyword_density, b.keyword_density);
    }
}
