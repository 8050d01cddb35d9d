use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::matcher::token::TokenCounts;
use crate::matcher::vector::FeatureVector;

/// One company as delivered by the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// A company after vectorization, frozen into an epoch.
///
/// `skill_terms` holds, per declared skill, its canonical token forms;
/// a skill whose tokens all occur in a resume counts as covered.
#[derive(Debug, Clone)]
pub struct CompanyProfile {
    pub id: String,
    pub required_skills: Vec<String>,
    pub(crate) skill_terms: Vec<Vec<String>>,
    pub vector: FeatureVector,
}

/// Ordered set of distinct corpus terms.
///
/// Each term gets the index of its first appearance during the corpus
/// scan. Indices are stable for the lifetime of the epoch the
/// vocabulary belongs to; a rebuild produces a fresh `Vocabulary`.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Index of `term`, or `None` when out of vocabulary.
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at `index`, or `None` when out of range.
    #[inline]
    pub fn term_at(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|term| term.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Inverse-document-frequency weights, one per vocabulary index.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    weights: Vec<f64>,
}

impl IdfTable {
    /// Weight for a vocabulary index. Out-of-range indices weigh zero.
    #[inline]
    pub fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Scan a corpus of token multisets into a vocabulary and its IDF table.
///
/// Document frequency counts each document at most once per term.
/// `idf(t) = ln((1 + N) / (1 + df(t))) + 1`: smoothing keeps every
/// weight strictly positive, including terms present in all documents.
pub(crate) fn scan_corpus(docs: &[TokenCounts]) -> (Vocabulary, IdfTable) {
    let mut terms: IndexSet<Box<str>> = IndexSet::new();
    let mut doc_freq: Vec<u64> = Vec::new();

    for doc in docs {
        for token in doc.tokens() {
            let (index, inserted) = terms.insert_full(Box::from(token));
            if inserted {
                doc_freq.push(0);
            }
            doc_freq[index] += 1;
        }
    }

    let n = docs.len() as f64;
    let weights = doc_freq
        .iter()
        .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    (Vocabulary { terms }, IdfTable { weights })
}
