use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Multiset of normalized tokens for a single document.
///
/// Counts how many times each token occurs, together with the running
/// total. Insertion order is preserved, so identical token sequences
/// produce identical iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    #[serde(with = "indexmap::map::serde_seq")]
    counts: IndexMap<String, u32>,
    total: u64,
}

impl TokenCounts {
    pub fn new() -> Self {
        TokenCounts {
            counts: IndexMap::new(),
            total: 0,
        }
    }

    /// Record one occurrence of `token`.
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        *self.counts.entry(token.to_string()).or_insert(0) += 1;
        self.total += 1;
        self
    }

    /// Record one occurrence of each token in `tokens`.
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Occurrence count of `token`, 0 when absent.
    #[inline]
    pub fn count(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Total number of occurrences across all tokens.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens.
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(token, count)` pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// Iterate over distinct tokens in insertion order.
    #[inline]
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|token| token.as_str())
    }
}
