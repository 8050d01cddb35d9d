use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::matcher::corpus::{IdfTable, Vocabulary};
use crate::matcher::token::TokenCounts;

/// Sparse TF-IDF vector over a frozen vocabulary.
///
/// Entries are `(vocabulary index, weight)` sorted ascending by index.
/// After construction the weights are unit-normalized, or the entry
/// list is empty and `norm` is 0 (no vocabulary overlap). `norm` keeps
/// the pre-normalization Euclidean norm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    entries: Vec<(u32, f64)>,
    norm: f64,
}

impl FeatureVector {
    /// Vectorize a token multiset against `vocabulary` and `idf`.
    ///
    /// Raw weight per in-vocabulary token is `count * idf`;
    /// out-of-vocabulary tokens contribute nothing. The zero vector is
    /// returned unchanged, never divided.
    pub fn tf_idf(counts: &TokenCounts, vocabulary: &Vocabulary, idf: &IdfTable) -> Self {
        let mut entries: Vec<(u32, f64)> = counts
            .iter()
            .filter_map(|(token, count)| {
                vocabulary
                    .index_of(token)
                    .map(|index| (index as u32, count as f64 * idf.weight(index)))
            })
            .collect();
        entries.sort_unstable_by_key(|&(index, _)| index);

        let norm = entries
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for (_, weight) in entries.iter_mut() {
                *weight /= norm;
            }
        }
        FeatureVector { entries, norm }
    }

    /// True for the degenerate no-overlap vector.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-zero components.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Pre-normalization Euclidean norm (0 for the zero vector).
    #[inline]
    pub fn raw_norm(&self) -> f64 {
        self.norm
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Cosine similarity, in [0, 1].
    ///
    /// Both vectors are unit norm (or zero), so this is the plain dot
    /// product over overlapping indices. Zero on either side scores 0.
    pub fn cosine(&self, other: &FeatureVector) -> f64 {
        self.dot_with_overlap(other).0
    }

    /// Dot product plus the overlapping vocabulary indices, one pass.
    ///
    /// The overlap support feeds the "why matched" explanation and is a
    /// byproduct of the same sorted merge that computes the score.
    pub fn dot_with_overlap(&self, other: &FeatureVector) -> (f64, Vec<u32>) {
        let mut a_it = self.entries.iter().fuse();
        let mut b_it = other.entries.iter().fuse();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut dot = 0.0_f64;
        let mut overlap = Vec::new();

        while let (Some(&(ia, va)), Some(&(ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    dot += va * vb;
                    overlap.push(ia);
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        // Clamp rounding residue; weights are non-negative so the lower
        // bound is exact.
        (dot.min(1.0), overlap)
    }
}
