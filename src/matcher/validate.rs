use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default section headers a resume is expected to carry at least one of.
const DEFAULT_SECTION_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "work experience",
    "employment",
    "qualification",
    "projects",
    "internship",
    "objective",
    "summary",
    "achievements",
    "certifications",
];

const EMAIL_PATTERN: &str = r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}";
const PHONE_PATTERN: &str = r"\+?\d[\d\s().-]{7,}\d";
const CONTACT_KEYWORD_PATTERN: &str = r"\b(e-?mail|phone|mobile|contact|linkedin|github)\b";

/// Thresholds and keyword sets for structural resume validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Minimum character count of the trimmed text.
    pub min_length: usize,
    /// Section headers, matched case-insensitively as substrings.
    pub section_keywords: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            min_length: 200,
            section_keywords: DEFAULT_SECTION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Outcome of structural validation for one resume.
///
/// `valid` is true iff `violations` is empty. `confidence` is the
/// fraction of rules passed, a coarse quality diagnostic for the
/// caller's reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub resume_id: String,
    pub valid: bool,
    pub violations: Vec<String>,
    pub confidence: f64,
}

/// One independent structural check.
///
/// Rules never short-circuit each other; every rule runs and
/// contributes zero or one violation.
struct ValidationRule {
    violation: String,
    check: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

/// Applies a fixed list of structural rules to raw extracted text.
///
/// Never panics on malformed input; failure is data, not an error.
pub struct ResumeValidator {
    rules: Vec<ValidationRule>,
}

impl ResumeValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        let email = Regex::new(EMAIL_PATTERN).unwrap();
        let phone = Regex::new(PHONE_PATTERN).unwrap();
        let contact_keyword = Regex::new(CONTACT_KEYWORD_PATTERN).unwrap();

        let min_length = config.min_length;
        let section_keywords = config.section_keywords;

        let rules = vec![
            ValidationRule {
                violation: format!("text is shorter than the {min_length} character minimum"),
                check: Box::new(move |text: &str| text.trim().chars().count() >= min_length),
            },
            ValidationRule {
                violation: "no contact information found (email, phone, or profile link)"
                    .to_string(),
                check: Box::new(move |text: &str| {
                    let lowered = text.to_lowercase();
                    email.is_match(&lowered)
                        || phone.is_match(&lowered)
                        || contact_keyword.is_match(&lowered)
                }),
            },
            ValidationRule {
                violation: "no recognizable section header (experience, education, skills, ...)"
                    .to_string(),
                check: Box::new(move |text: &str| {
                    let lowered = text.to_lowercase();
                    section_keywords.iter().any(|k| lowered.contains(k.as_str()))
                }),
            },
        ];

        ResumeValidator { rules }
    }

    /// Run every rule against `text` and collect all violations.
    pub fn validate(&self, resume_id: &str, text: &str) -> ValidationReport {
        let violations: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| !(rule.check)(text))
            .map(|rule| rule.violation.clone())
            .collect();

        let passed = self.rules.len() - violations.len();
        ValidationReport {
            resume_id: resume_id.to_string(),
            valid: violations.is_empty(),
            confidence: passed as f64 / self.rules.len() as f64,
            violations,
        }
    }
}

impl Default for ResumeValidator {
    fn default() -> Self {
        ResumeValidator::new(ValidatorConfig::default())
    }
}
