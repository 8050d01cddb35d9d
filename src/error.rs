use thiserror::Error;

use crate::matcher::validate::ValidationReport;

/// Failure to build a vocabulary epoch.
///
/// Either variant leaves the previously published epoch (if any)
/// active and serving.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("corpus contains no company documents")]
    EmptyCorpus,
    #[error("duplicate company id `{0}` in corpus")]
    DuplicateCompanyId(String),
}

/// Failure to serve one matching request.
///
/// Request-scoped; the engine state is untouched.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The resume failed structural validation. The full report is
    /// carried so the caller can surface it as-is; there is nothing to
    /// retry, the cause is data quality.
    #[error("resume `{}` failed validation: {}", .report.resume_id, .report.violations.join("; "))]
    InvalidResume { report: ValidationReport },
    /// A request arrived before any corpus was built.
    #[error("no vocabulary epoch has been built yet")]
    VocabularyNotBuilt,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_resume_message_lists_violations() {
        let err = MatchError::InvalidResume {
            report: ValidationReport {
                resume_id: "r9".to_string(),
                valid: false,
                violations: vec!["too short".to_string(), "no contact".to_string()],
                confidence: 0.0,
            },
        };
        let message = err.to_string();
        assert!(message.contains("r9"));
        assert!(message.contains("too short; no contact"));
    }

    #[test]
    fn duplicate_id_names_the_company() {
        let err = BuildError::DuplicateCompanyId("acme".to_string());
        assert!(err.to_string().contains("`acme`"));
    }
}
