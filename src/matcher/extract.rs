use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};
use serde::Deserialize;

use crate::matcher::token::TokenCounts;

/// Standard English stop words, filtered out before stemming.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "could", "did",
    "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "itself", "just", "me", "more", "most", "my", "myself",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

/// Tuning knobs for text normalization.
///
/// The stopword list and the stemming switch are corpus-tuning
/// parameters, not part of the matching contract; swap them per
/// deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tokens to drop entirely.
    pub stopwords: Vec<String>,
    /// Tokens shorter than this are dropped.
    pub min_token_len: usize,
    /// Reduce tokens to their Snowball English stem.
    pub stem: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            stopwords: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            min_token_len: 2,
            stem: true,
        }
    }
}

/// Turns raw text into a [`TokenCounts`] multiset.
///
/// Pipeline: lowercase fold, split on non-alphanumeric boundaries, drop
/// short tokens and stopwords, stem to a canonical form. Stopwords are
/// matched before stemming so the configured list applies literally.
/// The same input text always produces the same multiset.
pub struct FeatureExtractor {
    stopwords: HashSet<String>,
    stemmer: Option<Stemmer>,
    min_token_len: usize,
}

impl FeatureExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        FeatureExtractor {
            stopwords: config.stopwords.into_iter().collect(),
            stemmer: config.stem.then(|| Stemmer::create(Algorithm::English)),
            min_token_len: config.min_token_len,
        }
    }

    /// Extract the normalized token multiset of `text`.
    ///
    /// A text that filters down to nothing yields an empty multiset,
    /// which vectorizes to the zero vector downstream.
    pub fn extract(&self, text: &str) -> TokenCounts {
        let lowered = text.to_lowercase();
        let mut counts = TokenCounts::new();
        for raw in lowered.split(|c: char| !c.is_alphanumeric()) {
            if raw.is_empty() || raw.len() < self.min_token_len || self.stopwords.contains(raw) {
                continue;
            }
            match &self.stemmer {
                Some(stemmer) => counts.add_token(&stemmer.stem(raw)),
                None => counts.add_token(raw),
            };
        }
        counts
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        FeatureExtractor::new(ExtractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_counts_occurrences() {
        let extractor = FeatureExtractor::default();
        let counts = extractor.extract("Python python PYTHON backend");

        assert_eq!(counts.count("python"), 3);
        assert_eq!(counts.count("backend"), 1);
    }

    #[test]
    fn drops_stopwords_and_short_tokens() {
        let extractor = FeatureExtractor::default();
        let counts = extractor.extract("the quick fox is a fox");

        assert!(!counts.contains("the"));
        assert!(!counts.contains("is"));
        assert!(!counts.contains("a"));
        assert_eq!(counts.count("fox"), 2);
    }

    #[test]
    fn stems_to_canonical_form() {
        let extractor = FeatureExtractor::default();
        let counts = extractor.extract("developer developers developing");

        // All three share one canonical stem.
        assert_eq!(counts.distinct_len(), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn extraction_is_deterministic() {
        let extractor = FeatureExtractor::default();
        let text = "Senior Rust engineer, 5 years of distributed systems.";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn degenerate_text_yields_empty_multiset() {
        let extractor = FeatureExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("  \t\n ").is_empty());
        assert!(extractor.extract("of the and").is_empty());
    }

    #[test]
    fn stopword_list_is_replaceable() {
        let extractor = FeatureExtractor::new(ExtractorConfig {
            stopwords: vec!["python".to_string()],
            min_token_len: 2,
            stem: false,
        });
        let counts = extractor.extract("python the rust");

        assert!(!counts.contains("python"));
        assert_eq!(counts.count("the"), 1);
        assert_eq!(counts.count("rust"), 1);
    }
}
