//! Flesch Reading Ease scoring
//!
//! Implements the classic formula
//! `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`
//! with a vowel-group syllable approximation, clamped to [0, 100].

use crate::text;

/// Compute the Flesch Reading Ease score for plain text
///
/// Returns an integer in [0, 100]; empty text scores 0.
pub fn flesch_reading_ease(plain_text: &str) -> u8 {
    let words = text::tokenize(plain_text);
    let sentences = text::split_sentences(plain_text);

    if words.is_empty() || sentences.is_empty() {
        return 0;
    }

    let word_count = words.len() as f64;
    let sentence_count = sentences.len() as f64;
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

    let score = 206.835
        - 1.015 * (word_count / sentence_count)
        - 84.6 * (syllable_count as f64 / word_count);

    score.round().clamp(0.0, 100.0) as u8
}

/// Approximate the syllable count of a single lowercase word
///
/// Counts groups of consecutive vowels after stripping a trailing silent
/// "e"; every word counts as at least one syllable.
pub(crate) fn syllables(word: &str) -> usize {
    let mut chars: Vec<char> = word.chars().collect();

    // Strip a trailing silent "e" ("those" -> "thos"), but keep short
    // words like "the" intact.
    if chars.len() > 3 && chars.last() == Some(&'e') {
        chars.pop();
    }

    let mut groups = 0;
    let mut in_group = false;
    for c in chars {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !in_group {
            groups += 1;
        }
        in_group = is_vowel;
    }

    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_approximation() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("the"), 1);
        assert_eq!(syllables("grooming"), 2);
        assert_eq!(syllables("beautiful"), 3);
        // Trailing silent "e" is stripped.
        assert_eq!(syllables("those"), 1);
        // Words with no vowels still count one syllable.
        assert_eq!(syllables("hmm"), 1);
    }

    #[test]
    fn test_simple_text_scores_high() {
        let score = flesch_reading_ease("The dog ran. The cat sat. It was fun.");
        assert!(score > 90, "expected a high score, got {}", score);
    }

    #[test]
    fn test_dense_text_scores_lower() {
        let dense = "Comprehensive institutional accountability necessitates \
                     interdisciplinary organizational transformation throughout \
                     multinational bureaucratic infrastructures.";
        let simple_score = flesch_reading_ease("The dog ran. The cat sat.");
        let dense_score = flesch_reading_ease(dense);
        assert!(dense_score < simple_score);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(flesch_reading_ease(""), 0);
        assert_eq!(flesch_reading_ease("   "), 0);
    }

    #[test]
    fn test_score_bounds() {
        for text in ["a.", "why?", "Antidisestablishmentarianism notwithstanding."] {
            let score = flesch_reading_ease(text);
            assert!(score <= 100);
        }
    }
}
