//! SEO scoring with a point-budget model
//!
//! Each on-page factor contributes points toward a possible total that
//! varies with which inputs were supplied (keyword bonuses only count
//! toward the budget when a target keyword exists). The final score is
//! `achieved / possible * 100`.

use crate::scoring::signals::ContentSignals;
use crate::text;

/// Caller-supplied metadata for SEO scoring
#[derive(Debug, Clone, Default)]
pub struct SeoInputs<'a> {
    /// Page title, if one exists yet
    pub title: Option<&'a str>,

    /// Meta description, if one exists yet
    pub meta_description: Option<&'a str>,

    /// Primary keyword the content targets
    pub target_keyword: Option<&'a str>,

    /// Whether a featured image is attached
    pub has_featured_image: bool,
}

/// Compute the SEO score for a content body, as an integer in [0, 100]
pub fn seo_score(signals: &ContentSignals, inputs: &SeoInputs) -> u8 {
    let mut achieved = 0.0;
    let mut possible = 0.0;
    let keyword = inputs.target_keyword.filter(|k| !k.trim().is_empty());

    // Title length, optimum 30-60 characters.
    possible += 15.0;
    if let Some(title) = inputs.title {
        let len = title.chars().count();
        if (30..=60).contains(&len) {
            achieved += 15.0;
        } else if !title.is_empty() {
            achieved += 6.0;
        }
        if let Some(kw) = keyword {
            possible += 5.0;
            if text::contains_ignore_case(title, kw) {
                achieved += 5.0;
            }
        }
    } else if keyword.is_some() {
        possible += 5.0;
    }

    // Meta description, optimum 120-160 characters.
    possible += 10.0;
    if let Some(meta) = inputs.meta_description {
        let len = meta.chars().count();
        if (120..=160).contains(&len) {
            achieved += 10.0;
        } else if !meta.is_empty() {
            achieved += 4.0;
        }
        if let Some(kw) = keyword {
            possible += 3.0;
            if text::contains_ignore_case(meta, kw) {
                achieved += 3.0;
            }
        }
    } else if keyword.is_some() {
        possible += 3.0;
    }

    // Content length tiers.
    possible += 15.0;
    achieved += match signals.word_count {
        w if w >= 2000 => 15.0,
        w if w >= 1000 => 10.0,
        w if w >= 500 => 5.0,
        w if w >= 300 => 2.0,
        _ => 0.0,
    };

    // Heading structure.
    possible += 15.0;
    if signals.h1_count == 1 {
        achieved += 5.0;
    }
    if signals.h2_count >= 2 {
        achieved += 5.0;
    }
    if signals.h3_count >= 1 {
        achieved += 5.0;
    }
    if let Some(kw) = keyword {
        possible += 5.0;
        if signals
            .heading_texts
            .iter()
            .any(|h| text::contains_ignore_case(h, kw))
        {
            achieved += 5.0;
        }
    }

    // Keyword density, optimum 0.5-2.5%.
    if let Some(kw) = keyword {
        possible += 15.0;
        let density = keyword_density(&signals.plain_text, signals.word_count, kw);
        if (0.5..=2.5).contains(&density) {
            achieved += 15.0;
        } else if (0.1..0.5).contains(&density) || (2.5..4.0).contains(&density) {
            achieved += 8.0;
        }
    }

    // Links.
    possible += 10.0;
    if signals.link_count >= 3 {
        achieved += 10.0;
    } else if signals.link_count >= 1 {
        achieved += 5.0;
    }

    // Image alt-text coverage.
    possible += 10.0;
    achieved += signals.alt_coverage() * 10.0;

    // Featured image.
    possible += 5.0;
    if inputs.has_featured_image {
        achieved += 5.0;
    }

    (achieved / possible * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Density of a keyword in percent of total words
///
/// Multi-word keywords count each occurrence once against the word total.
pub fn keyword_density(plain_text: &str, word_count: usize, keyword: &str) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    text::occurrences(plain_text, keyword) as f64 / word_count as f64 * 100.0
}
