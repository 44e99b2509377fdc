//! Keyword matching between detection signals and declared tags/keywords.

/// Normalize text for matching: lowercase, replace separators with spaces.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into individual words for matching.
pub fn split_into_words(text: &str) -> Vec<String> {
    normalize_text(text)
        .split_whitespace()
        .map(|s| s.to_string())
        .collect()
}

/// Score one file's declared terms against the supplied detection signals.
///
/// `signal_text` is the normalized joined signal string, `signal_words` its
/// word list. Multi-word terms score 2.0 on a phrase hit, single-word terms
/// 1.0 on a word hit.
pub fn score_terms(signal_text: &str, signal_words: &[String], terms: &[&str]) -> f32 {
    let mut score = 0.0;

    for term in terms {
        let term_normalized = normalize_text(term);
        if term_normalized.is_empty() {
            continue;
        }
        let is_phrase = term_normalized.contains(' ');

        if is_phrase && signal_text.contains(&term_normalized) {
            score += 2.0;
        } else if !is_phrase && signal_words.iter().any(|w| w == &term_normalized) {
            score += 1.0;
        }
    }

    score
}

/// True when a trigger phrase is active in the supplied signal text.
pub fn phrase_matches(signal_text: &str, phrase: &str) -> bool {
    let normalized = normalize_text(phrase);
    !normalized.is_empty() && signal_text.contains(&normalized)
}
