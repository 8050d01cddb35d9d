/// This crate matches resumes against a company catalog using TF-IDF vectors.
pub mod error;
pub mod matcher;

/// Match Engine
/// The top-level struct of this crate, driving the full matching pipeline:
/// structural resume validation, feature extraction, TF-IDF vectorization
/// against a frozen vocabulary, cosine scoring of every company, and
/// ranked recommendation output.
///
/// Internally, it holds:
/// - A feature extractor (normalization pipeline)
/// - A resume validator (declarative rule list)
/// - The current vocabulary epoch as `Option<Arc<Epoch>>`
///
/// Rebuilding the corpus publishes a fresh [`Epoch`] with a single
/// pointer swap; request-path methods only ever read a consistent epoch.
pub use matcher::MatchEngine;

/// Vocabulary Epoch
/// One immutable generation of the (vocabulary, IDF table, company
/// vectors) triple. Handles obtained via `MatchEngine::current_epoch`
/// stay valid and unchanged across later rebuilds.
pub use matcher::Epoch;

/// Matching request and configuration shapes consumed at the boundary.
/// Serialization of these shapes (for an API layer or dashboard) is the
/// responsibility of the surrounding application.
pub use matcher::{MatchRequest, MatcherConfig};

/// Company input record
/// Minimal company shape delivered by the corpus-loading collaborator:
/// id, descriptive text, and an optional required-skill list.
pub use matcher::corpus::CompanyRecord;

/// Company profile
/// A company after vectorization, frozen into an epoch together with the
/// canonical forms of its required skills.
pub use matcher::corpus::CompanyProfile;

/// Vocabulary and IDF table
/// Ordered term set with stable per-epoch indices, and the dense
/// inverse-document-frequency weights parallel to it.
pub use matcher::corpus::{IdfTable, Vocabulary};

/// Token multiset
/// Normalized token -> occurrence count mapping for one document, the
/// output of feature extraction and the input to vectorization.
pub use matcher::token::TokenCounts;

/// Feature extractor
/// Lowercases, tokenizes, drops stopwords, and stems raw text into a
/// `TokenCounts` multiset. Stopword list and stemming are injectable
/// via `ExtractorConfig`.
pub use matcher::extract::{ExtractorConfig, FeatureExtractor};

/// Feature vector
/// Sparse unit-normalized TF-IDF vector over a frozen vocabulary, with
/// merge-join cosine similarity and overlap reporting.
pub use matcher::vector::FeatureVector;

/// Resume validation
/// Declarative structural rules with all violations collected, never
/// short-circuited; produces a `ValidationReport` verdict.
pub use matcher::validate::{ResumeValidator, ValidationReport, ValidatorConfig};

/// Match result
/// One scored resume-to-company pairing with the overlapping terms
/// backing the score and required-skill coverage.
pub use matcher::rank::MatchResult;

/// Error taxonomy
/// Corpus-build failures leave the last-known-good epoch serving;
/// request failures are structured and request-scoped.
pub use error::{BuildError, MatchError};
