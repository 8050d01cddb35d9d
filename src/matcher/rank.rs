use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One scored resume-to-company pairing.
///
/// `matched_terms` is the vocabulary overlap backing the score, for
/// "why matched" explanations. `matched_skills` / `missing_skills`
/// split the company's declared required skills by whether the resume
/// covers them. Request-scoped; never retained by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub resume_id: String,
    pub company_id: String,
    pub score: f64,
    pub matched_terms: BTreeSet<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Filter, order, and truncate scored results.
///
/// Scores below `min_score` are dropped, the rest sorted descending by
/// score with ties broken by ascending company id, so equal corpora
/// always rank identically regardless of scoring order. At most
/// `top_k` results survive; fewer is not an error.
pub(crate) fn rank(mut results: Vec<MatchResult>, top_k: usize, min_score: f64) -> Vec<MatchResult> {
    results.retain(|r| r.score >= min_score);
    results.sort_unstable_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.company_id.cmp(&b.company_id))
    });
    results.truncate(top_k);
    results
}
