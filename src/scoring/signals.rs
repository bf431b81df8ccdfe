//! Structural signal extraction for the content scorer
//!
//! Parses an HTML body once and collects the raw counts (headings, links,
//! images, alt coverage, words, sentences) that every scoring dimension
//! reads from.

use scraper::{Html, Selector};

use crate::scoring::error::ScoreError;
use crate::text;

/// Raw structural facts about one content body
#[derive(Debug, Clone)]
pub struct ContentSignals {
    /// Plain text with tags stripped and whitespace normalized
    pub plain_text: String,

    /// Number of words in the plain text
    pub word_count: usize,

    /// Number of sentences in the plain text
    pub sentence_count: usize,

    /// Number of H1 elements
    pub h1_count: usize,

    /// Number of H2 elements
    pub h2_count: usize,

    /// Number of H3 elements
    pub h3_count: usize,

    /// Text of every H1-H3 element, in document order
    pub heading_texts: Vec<String>,

    /// Number of anchor elements with an href attribute
    pub link_count: usize,

    /// Number of image elements
    pub image_count: usize,

    /// Number of image elements with non-empty alt text
    pub images_with_alt: usize,

    /// Number of paragraph elements
    pub paragraph_count: usize,
}

impl ContentSignals {
    /// Total number of H1-H3 headings
    pub fn heading_count(&self) -> usize {
        self.h1_count + self.h2_count + self.h3_count
    }

    /// Fraction of images carrying alt text, 1.0 when there are no images
    pub fn alt_coverage(&self) -> f64 {
        if self.image_count == 0 {
            1.0
        } else {
            self.images_with_alt as f64 / self.image_count as f64
        }
    }

    /// Average words per sentence, 0.0 for empty content
    pub fn avg_sentence_length(&self) -> f64 {
        if self.sentence_count == 0 {
            0.0
        } else {
            self.word_count as f64 / self.sentence_count as f64
        }
    }
}

fn selector(pattern: &str) -> Result<Selector, ScoreError> {
    Selector::parse(pattern)
        .map_err(|e| ScoreError::HtmlParse(format!("Failed to parse selector '{}': {}", pattern, e)))
}

/// Extract structural signals from an HTML content body
pub fn extract_signals(html: &str) -> Result<ContentSignals, ScoreError> {
    let document = Html::parse_document(html);

    let count = |sel: &Selector| document.select(sel).count();

    let h1 = selector("h1")?;
    let h2 = selector("h2")?;
    let h3 = selector("h3")?;
    let anchors = selector("a[href]")?;
    let images = selector("img")?;
    let paragraphs = selector("p")?;

    let mut heading_texts = Vec::new();
    for sel in [&h1, &h2, &h3] {
        for element in document.select(sel) {
            let heading = text::normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            if !heading.is_empty() {
                heading_texts.push(heading);
            }
        }
    }

    let images_with_alt = document
        .select(&images)
        .filter(|img| {
            img.value()
                .attr("alt")
                .is_some_and(|alt| !alt.trim().is_empty())
        })
        .count();

    let plain_text = text::strip_html(html);
    let word_count = text::word_count(&plain_text);
    let sentence_count = text::split_sentences(&plain_text).len();

    Ok(ContentSignals {
        plain_text,
        word_count,
        sentence_count,
        h1_count: count(&h1),
        h2_count: count(&h2),
        h3_count: count(&h3),
        heading_texts,
        link_count: count(&anchors),
        image_count: count(&images),
        images_with_alt,
        paragraph_count: count(&paragraphs),
    })
}
