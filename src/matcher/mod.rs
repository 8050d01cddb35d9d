pub mod corpus;
pub mod extract;
pub mod rank;
pub mod token;
pub mod validate;
pub mod vector;

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BuildError, MatchError};
use self::corpus::{CompanyProfile, CompanyRecord, IdfTable, Vocabulary};
use self::extract::{ExtractorConfig, FeatureExtractor};
use self::rank::MatchResult;
use self::token::TokenCounts;
use self::validate::{ResumeValidator, ValidationReport, ValidatorConfig};
use self::vector::FeatureVector;

/// Combined tuning configuration for the matching pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub extractor: ExtractorConfig,
    pub validator: ValidatorConfig,
}

/// One matching request, as delivered by the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub resume_id: String,
    pub resume_text: String,
    /// Maximum number of results, at least 1.
    pub top_k: usize,
    /// Scores below this are discarded, in [0, 1].
    pub min_score: f64,
}

/// One immutable generation of corpus state.
///
/// Vocabulary, IDF table, and company vectors always belong to the same
/// build; no caller can observe a vocabulary paired with weights or
/// vectors from a different generation. Handles stay valid across
/// rebuilds: a rebuild publishes a new `Epoch`, it never mutates a
/// live one.
#[derive(Debug)]
pub struct Epoch {
    vocabulary: Vocabulary,
    idf: IdfTable,
    companies: Vec<CompanyProfile>,
}

impl Epoch {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    pub fn companies(&self) -> &[CompanyProfile] {
        &self.companies
    }
}

/// Matches resumes against a vectorized company corpus.
///
/// Owns the extractor and validator plus the current [`Epoch`]. All
/// request-path methods take `&self` and only read epoch state; the
/// single mutation point is [`MatchEngine::rebuild`].
pub struct MatchEngine {
    extractor: FeatureExtractor,
    validator: ResumeValidator,
    epoch: Option<Arc<Epoch>>,
}

impl MatchEngine {
    pub fn new() -> Self {
        MatchEngine::with_config(MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        MatchEngine {
            extractor: FeatureExtractor::new(config.extractor),
            validator: ResumeValidator::new(config.validator),
            epoch: None,
        }
    }

    /// Build and publish a new epoch from `records`.
    ///
    /// The whole triple (vocabulary, IDF table, company vectors) is
    /// assembled off to the side and swapped in as one pointer store;
    /// on any error the current epoch keeps serving untouched. An
    /// empty corpus and duplicate company ids are rejected.
    pub fn rebuild(&mut self, records: &[CompanyRecord]) -> Result<Arc<Epoch>, BuildError> {
        if records.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id.as_str()) {
                return Err(BuildError::DuplicateCompanyId(record.id.clone()));
            }
        }

        let docs: Vec<TokenCounts> = records
            .par_iter()
            .map(|record| self.extractor.extract(&record.description))
            .collect();
        let (vocabulary, idf) = corpus::scan_corpus(&docs);

        let companies: Vec<CompanyProfile> = records
            .par_iter()
            .zip(docs.par_iter())
            .map(|(record, doc)| {
                let skill_terms = record
                    .required_skills
                    .iter()
                    .map(|skill| {
                        self.extractor
                            .extract(skill)
                            .tokens()
                            .map(str::to_string)
                            .collect()
                    })
                    .collect();
                CompanyProfile {
                    id: record.id.clone(),
                    required_skills: record.required_skills.clone(),
                    skill_terms,
                    vector: FeatureVector::tf_idf(doc, &vocabulary, &idf),
                }
            })
            .collect();

        let epoch = Arc::new(Epoch {
            vocabulary,
            idf,
            companies,
        });
        info!(
            companies = records.len(),
            vocabulary_terms = epoch.vocabulary.len(),
            "published new vocabulary epoch"
        );
        self.epoch = Some(Arc::clone(&epoch));
        Ok(epoch)
    }

    /// Handle to the currently published epoch, if any.
    pub fn current_epoch(&self) -> Option<Arc<Epoch>> {
        self.epoch.clone()
    }

    /// Structural validation only; never advances to matching.
    pub fn validate(&self, resume_id: &str, text: &str) -> ValidationReport {
        self.validator.validate(resume_id, text)
    }

    /// Serve one matching request: validate, vectorize, score every
    /// company, rank.
    pub fn recommend(&self, request: &MatchRequest) -> Result<Vec<MatchResult>, MatchError> {
        if request.top_k == 0 {
            return Err(MatchError::InvalidRequest(
                "top_k must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&request.min_score) {
            return Err(MatchError::InvalidRequest(
                "min_score must be within [0, 1]".to_string(),
            ));
        }
        let epoch = self.current_epoch().ok_or(MatchError::VocabularyNotBuilt)?;

        let report = self.validator.validate(&request.resume_id, &request.resume_text);
        if !report.valid {
            return Err(MatchError::InvalidResume { report });
        }

        let resume_tokens = self.extractor.extract(&request.resume_text);
        let resume_vector = FeatureVector::tf_idf(&resume_tokens, &epoch.vocabulary, &epoch.idf);

        // Each company reads the same frozen epoch and fills its own
        // result slot; no shared mutable state in the scoring phase.
        let scored: Vec<MatchResult> = epoch
            .companies
            .par_iter()
            .map(|company| {
                score_company(
                    &request.resume_id,
                    &resume_tokens,
                    &resume_vector,
                    company,
                    &epoch.vocabulary,
                )
            })
            .collect();
        debug!(
            resume = request.resume_id.as_str(),
            companies = scored.len(),
            "scored matching request"
        );

        Ok(rank::rank(scored, request.top_k, request.min_score))
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        MatchEngine::new()
    }
}

fn score_company(
    resume_id: &str,
    resume_tokens: &TokenCounts,
    resume_vector: &FeatureVector,
    company: &CompanyProfile,
    vocabulary: &Vocabulary,
) -> MatchResult {
    let (score, overlap) = resume_vector.dot_with_overlap(&company.vector);
    let matched_terms: BTreeSet<String> = overlap
        .iter()
        .filter_map(|&index| vocabulary.term_at(index as usize))
        .map(str::to_string)
        .collect();

    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();
    for (skill, terms) in company.required_skills.iter().zip(&company.skill_terms) {
        // A skill is covered when every one of its canonical tokens
        // occurs in the resume. Skills that normalize to nothing can
        // never be verified, so they stay missing.
        let covered = !terms.is_empty()
            && terms.iter().all(|term| resume_tokens.contains(term));
        if covered {
            matched_skills.push(skill.clone());
        } else {
            missing_skills.push(skill.clone());
        }
    }

    MatchResult {
        resume_id: resume_id.to_string(),
        company_id: company.id.clone(),
        score,
        matched_terms,
        matched_skills,
        missing_skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(id: &str, description: &str) -> CompanyRecord {
        CompanyRecord {
            id: id.to_string(),
            description: description.to_string(),
            required_skills: Vec::new(),
        }
    }

    fn engine_with_corpus(records: &[CompanyRecord]) -> MatchEngine {
        // Short fixture resumes: lower the length threshold, which is a
        // deployment tuning knob rather than part of the contract.
        let mut engine = MatchEngine::with_config(MatcherConfig {
            validator: ValidatorConfig {
                min_length: 50,
                ..ValidatorConfig::default()
            },
            ..MatcherConfig::default()
        });
        engine.rebuild(records).unwrap();
        engine
    }

    fn two_company_corpus() -> Vec<CompanyRecord> {
        vec![
            company("A", "python backend engineer"),
            company("B", "frontend react developer"),
        ]
    }

    const BACKEND_RESUME: &str = "experienced python backend developer, email: x@y.com, \
                                  5 years experience, skills: python, APIs";

    fn request(text: &str, top_k: usize, min_score: f64) -> MatchRequest {
        MatchRequest {
            resume_id: "r1".to_string(),
            resume_text: text.to_string(),
            top_k,
            min_score,
        }
    }

    #[test]
    fn backend_resume_ranks_backend_company_first() {
        let engine = engine_with_corpus(&two_company_corpus());
        let results = engine.recommend(&request(BACKEND_RESUME, 10, 0.0)).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].company_id, "A");
        assert_eq!(results[1].company_id, "B");
        assert!(results[0].score > results[1].score);
        assert!(results[0].matched_terms.contains("python"));
        assert!(results[0].matched_terms.contains("backend"));
    }

    #[test]
    fn empty_resume_fails_validation_with_reasons() {
        let engine = engine_with_corpus(&two_company_corpus());
        let err = engine.recommend(&request("", 5, 0.0)).unwrap_err();

        match err {
            MatchError::InvalidResume { report } => {
                assert!(!report.valid);
                assert!(report
                    .violations
                    .iter()
                    .any(|v| v.contains("character minimum")));
                assert!(report
                    .violations
                    .iter()
                    .any(|v| v.contains("contact information")));
            }
            other => panic!("expected InvalidResume, got {other:?}"),
        }
    }

    #[test]
    fn unreachable_min_score_returns_empty_list() {
        let engine = engine_with_corpus(&two_company_corpus());
        let results = engine.recommend(&request(BACKEND_RESUME, 5, 0.9)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn request_before_any_rebuild_fails_clearly() {
        let engine = MatchEngine::new();
        let err = engine.recommend(&request(BACKEND_RESUME, 5, 0.0)).unwrap_err();
        assert!(matches!(err, MatchError::VocabularyNotBuilt));
    }

    #[test]
    fn request_bounds_are_checked() {
        let engine = engine_with_corpus(&two_company_corpus());

        let err = engine.recommend(&request(BACKEND_RESUME, 0, 0.0)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidRequest(_)));

        let err = engine.recommend(&request(BACKEND_RESUME, 5, 1.5)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidRequest(_)));

        let err = engine
            .recommend(&request(BACKEND_RESUME, 5, f64::NAN))
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidRequest(_)));
    }

    #[test]
    fn empty_corpus_rebuild_keeps_previous_epoch_serving() {
        let mut engine = engine_with_corpus(&two_company_corpus());
        let before = engine.current_epoch().unwrap();

        let err = engine.rebuild(&[]).unwrap_err();
        assert!(matches!(err, BuildError::EmptyCorpus));

        let after = engine.current_epoch().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert!(engine.recommend(&request(BACKEND_RESUME, 5, 0.0)).is_ok());
    }

    #[test]
    fn duplicate_company_id_rejects_the_corpus() {
        let mut engine = MatchEngine::new();
        let records = vec![
            company("acme", "rust services"),
            company("acme", "go services"),
        ];
        let err = engine.rebuild(&records).unwrap_err();
        match err {
            BuildError::DuplicateCompanyId(id) => assert_eq!(id, "acme"),
            other => panic!("expected DuplicateCompanyId, got {other:?}"),
        }
        assert!(engine.current_epoch().is_none());
    }

    #[test]
    fn rebuild_never_mutates_a_prior_epoch() {
        let mut engine = engine_with_corpus(&two_company_corpus());
        let old = engine.current_epoch().unwrap();
        let old_terms = old.vocabulary().len();
        let old_vector = old.companies()[0].vector.clone();

        engine
            .rebuild(&[
                company("X", "embedded firmware c developer"),
                company("Y", "kernel driver engineer"),
            ])
            .unwrap();

        assert_eq!(old.vocabulary().len(), old_terms);
        assert_eq!(old.companies()[0].vector, old_vector);
        assert_eq!(old.companies()[0].id, "A");

        let new = engine.current_epoch().unwrap();
        assert!(!Arc::ptr_eq(&old, &new));
    }

    #[test]
    fn zero_overlap_resume_scores_zero_everywhere() {
        let engine = engine_with_corpus(&two_company_corpus());
        // Valid shape, but shares no vocabulary with the corpus.
        let text = "summary: accomplished ceramics artist, kiln firing, glaze chemistry, \
                    reach me at potter@clay.example";
        let results = engine.recommend(&request(text, 5, 0.0)).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score == 0.0));
        assert!(results.iter().all(|r| r.matched_terms.is_empty()));
    }

    #[test]
    fn required_skill_coverage_is_reported() {
        let records = vec![CompanyRecord {
            id: "acme".to_string(),
            description: "python data platform".to_string(),
            required_skills: vec![
                "Python".to_string(),
                "Machine Learning".to_string(),
                "Kubernetes".to_string(),
            ],
        }];
        let engine = engine_with_corpus(&records);
        let text = "summary: python engineer focused on machine learning pipelines, \
                    email me at ml@example.com";
        let results = engine.recommend(&request(text, 5, 0.0)).unwrap();

        assert_eq!(results[0].matched_skills, vec!["Python", "Machine Learning"]);
        assert_eq!(results[0].missing_skills, vec!["Kubernetes"]);
    }

    #[test]
    fn results_are_reproducible_across_calls() {
        let engine = engine_with_corpus(&two_company_corpus());
        let req = request(BACKEND_RESUME, 5, 0.0);
        assert_eq!(engine.recommend(&req).unwrap(), engine.recommend(&req).unwrap());
    }

    #[test]
    fn equal_scores_order_by_company_id() {
        let records = vec![
            company("delta", "rust engineer"),
            company("alpha", "rust engineer"),
            company("casey", "rust engineer"),
        ];
        let engine = engine_with_corpus(&records);
        let text = "summary: rust engineer, contact rust@example.com, systems experience";
        let results = engine.recommend(&request(text, 5, 0.0)).unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.company_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "casey", "delta"]);
    }

    #[test]
    fn company_records_deserialize_from_boundary_json() {
        let json = r#"{"id": "acme", "description": "rust services",
                       "required_skills": ["Rust", "Tokio"]}"#;
        let record: CompanyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "acme");
        assert_eq!(record.required_skills.len(), 2);

        // required_skills is optional at the boundary.
        let bare: CompanyRecord =
            serde_json::from_str(r#"{"id": "x", "description": "d"}"#).unwrap();
        assert!(bare.required_skills.is_empty());
    }
}
