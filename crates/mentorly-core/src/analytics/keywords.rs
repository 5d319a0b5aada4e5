//! Naive keyword extraction from free-text feedback.
//!
//! Whitespace tokens, trimmed of punctuation and lowercased. This is a
//! frequency-free heuristic, not language processing.

use std::collections::HashSet;

use crate::config::KeywordSettings;

/// Distinct tokens longer than `min_token_len`, in first-seen order, capped
/// at `max_keywords`.
pub fn extract_keywords<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    settings: &KeywordSettings,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for text in texts {
        for raw in text.split_whitespace() {
            if keywords.len() >= settings.max_keywords {
                return keywords;
            }
            let token = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.chars().count() > settings.min_token_len && seen.insert(token.clone()) {
                keywords.push(token);
            }
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tokens_and_duplicates_dropped() {
        let settings = KeywordSettings::default();
        let keywords = extract_keywords(
            ["Very clear, practical examples.", "Clear examples and great pacing!"],
            &settings,
        );
        assert_eq!(keywords, vec!["clear", "practical", "examples", "great", "pacing"]);
    }

    #[test]
    fn test_cap_applies() {
        let settings = KeywordSettings {
            min_token_len: 4,
            max_keywords: 2,
        };
        let keywords = extract_keywords(["alpha bravo charlie delta"], &settings);
        assert_eq!(keywords, vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_keywords(Vec::<&str>::new(), &KeywordSettings::default()).is_empty());
        assert!(extract_keywords(["", "   "], &KeywordSettings::default()).is_empty());
    }
}
