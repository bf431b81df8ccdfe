//! Shared text utilities for the pipeline
//!
//! Plain-text extraction, tokenization, sentence splitting, and slug
//! derivation used by the scorer, the crawler, and the enhancement phase.

use scraper::Html;

/// Strip HTML tags and return normalized plain text
///
/// # Arguments
///
/// * `html` - The HTML fragment or document to strip
///
/// # Returns
///
/// The text content with runs of whitespace collapsed to single spaces
pub fn strip_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let text: Vec<&str> = document.root_element().text().collect();
    normalize_whitespace(&text.join(" "))
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenize text into lowercase alphanumeric words
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Count the words in plain text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split plain text into sentences on `.`, `!`, and `?` delimiters
///
/// Empty fragments (e.g. from `...`) are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compute term frequencies for words longer than `min_len` characters
///
/// # Returns
///
/// Pairs of (term, count) sorted by descending count, ties broken
/// alphabetically so the ordering is deterministic.
pub fn term_frequencies(text: &str, min_len: usize) -> Vec<(String, usize)> {
    use std::collections::HashMap;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in tokenize(text) {
        if word.chars().count() > min_len {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// Take the `n` most frequent terms longer than `min_len` characters
pub fn top_terms(text: &str, min_len: usize, n: usize) -> Vec<String> {
    term_frequencies(text, min_len)
        .into_iter()
        .take(n)
        .map(|(term, _)| term)
        .collect()
}

/// Derive a URL slug from a title
///
/// Lowercases, replaces every non `[a-z0-9]` run with a single hyphen,
/// and truncates to `max_len` characters without a trailing hyphen.
pub fn slugify(title: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    let mut slug: String = slug.chars().take(max_len).collect();
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Count case-insensitive non-overlapping occurrences of a phrase
pub fn occurrences(text: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    let haystack = text.to_lowercase();
    let needle = phrase.to_lowercase();
    haystack.matches(&needle).count()
}

/// Case-insensitive containment check
pub fn contains_ignore_case(text: &str, phrase: &str) -> bool {
    occurrences(text, phrase) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        let html = "<h1>Title</h1><p>First paragraph.</p><p>Second   one.</p>";
        let text = strip_html(html);
        assert_eq!(text, "Title First paragraph. Second one.");
    }

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize("Dog Grooming, dog-grooming!");
        assert_eq!(tokens, vec!["dog", "grooming", "dog", "grooming"]);
    }

    #[test]
    fn test_split_sentences_drops_empty_fragments() {
        let sentences = split_sentences("One. Two! Three?  ...");
        assert_eq!(sentences, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_term_frequencies_order_is_deterministic() {
        let freqs = term_frequencies("apple apple banana banana cherry", 3);
        assert_eq!(
            freqs,
            vec![
                ("apple".to_string(), 2),
                ("banana".to_string(), 2),
                ("cherry".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_terms_ignores_short_words() {
        let terms = top_terms("the the the grooming grooming pets", 3, 10);
        assert_eq!(terms, vec!["grooming", "pets"]);
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(
            slugify("Best Pet Grooming Services!", 60),
            "best-pet-grooming-services"
        );
    }

    #[test]
    fn test_slugify_truncates_without_trailing_hyphen() {
        let slug = slugify("A Very Long Title That Keeps Going On And On Forever And Ever", 60);
        assert!(slug.len() <= 60);
        assert!(!slug.ends_with('-'));
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  pet --- grooming  ", 60), "pet-grooming");
    }

    #[test]
    fn test_occurrences_case_insensitive() {
        assert_eq!(occurrences("Pet grooming and PET GROOMING", "pet grooming"), 2);
        assert_eq!(occurrences("anything", ""), 0);
    }
}
