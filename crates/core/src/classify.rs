//! Accept/reject classification for extracted text.
//!
//! The classifier decides whether a blob of scraped text is trustworthy
//! course material or broken-page boilerplate. Rejection rules are checked
//! first and always win; acceptance then needs either an educational keyword
//! hit or enough prose density. Neither acceptance signal is trusted alone:
//! a navigation fragment can contain "course" by coincidence, and long text
//! can still be a wall of chrome.
//!
//! All thresholds and pattern lists live in [`ClassifyConfig`] rather than in
//! control flow, so they can be tuned and unit-tested as data.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

/// Keywords that mark text as likely course material.
const EDUCATIONAL_KEYWORDS: &[&str] = &[
    "assignment",
    "discussion",
    "reading",
    "course",
    "lesson",
    "chapter",
    "quiz",
    "exam",
    "homework",
    "project",
    "syllabus",
    "instructions",
    "requirements",
    "objective",
    "learning",
    "submit",
    "due date",
    "points",
    "grade",
    "module",
    "lecture",
    "tutorial",
    "description",
];

/// Broken-page signatures. Any match rejects the text outright.
static REJECT_RULES: LazyLock<Vec<RejectRule>> = LazyLock::new(|| {
    [
        (r"(?i)you need to have javascript enabled", "javascript disabled notice"),
        (r"(?i)javascript is (?:required|disabled)", "javascript disabled notice"),
        (r"(?i)enable javascript", "javascript disabled notice"),
        (r"(?i)an error (?:has )?occurred", "error page"),
        (r"(?i)page not found", "missing page"),
        (r"(?i)access denied", "access denied page"),
        (r"(?i)unauthorized", "access denied page"),
        (r"(?i)loading\s*\.\.\.", "loading placeholder"),
        (r"(?i)please wait", "loading placeholder"),
    ]
    .iter()
    .map(|(pattern, label)| RejectRule {
        pattern: Regex::new(pattern).expect("valid regex"),
        label: (*label).to_string(),
    })
    .collect()
});

/// A single broken-page signature.
#[derive(Debug, Clone)]
pub struct RejectRule {
    /// Pattern matched against the trimmed text.
    pub pattern: Regex,
    /// Diagnostic label reported in the verdict.
    pub label: String,
}

/// Configuration for the classifier.
///
/// The thresholds mirror the observed behavior of LMS pages and are
/// deliberately configuration, not constants; nothing about them is tuned
/// against a measured false-positive target.
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    /// Minimum trimmed length (chars) below which text is rejected.
    pub min_chars: usize,
    /// Token count needed for the prose-density acceptance path.
    pub density_min_tokens: usize,
    /// Tokens must be longer than this many chars to count toward density.
    pub density_token_len: usize,
    /// Total length (chars) needed for the prose-density acceptance path.
    pub density_min_chars: usize,
    /// Keywords whose presence accepts the text.
    pub keywords: Vec<String>,
    /// Broken-page signatures checked before any acceptance heuristic.
    pub reject_rules: Vec<RejectRule>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            min_chars: 50,
            density_min_tokens: 20,
            density_token_len: 2,
            density_min_chars: 200,
            keywords: EDUCATIONAL_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
            reject_rules: REJECT_RULES.clone(),
        }
    }
}

/// The accept/reject output of the classifier.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the text may be sent to the knowledge base.
    pub is_acceptable: bool,
    /// Diagnostic label of the rule that rejected the text, if any.
    pub failed_pattern: Option<String>,
}

impl Verdict {
    fn accept() -> Self {
        Self { is_acceptable: true, failed_pattern: None }
    }

    fn reject(label: &str) -> Self {
        Self { is_acceptable: false, failed_pattern: Some(label.to_string()) }
    }
}

/// Classifies extracted text as course material or boilerplate.
///
/// Rejects when the trimmed text is shorter than `min_chars` or matches any
/// reject rule. Otherwise accepts when an educational keyword occurs, or
/// when the text has at least `density_min_tokens` tokens longer than
/// `density_token_len` chars and more than `density_min_chars` chars total.
///
/// # Example
///
/// ```rust
/// use canvass_core::classify::{ClassifyConfig, validate};
///
/// let config = ClassifyConfig::default();
/// let verdict = validate("You need to have JavaScript enabled to view this content.", &config);
/// assert!(!verdict.is_acceptable);
/// assert_eq!(verdict.failed_pattern.as_deref(), Some("javascript disabled notice"));
/// ```
pub fn validate(text: &str, config: &ClassifyConfig) -> Verdict {
    let trimmed = text.trim();

    if trimmed.chars().count() < config.min_chars {
        debug!(chars = trimmed.chars().count(), "rejecting: below minimum length");
        return Verdict::reject("below minimum length");
    }

    for rule in &config.reject_rules {
        if rule.pattern.is_match(trimmed) {
            debug!(label = %rule.label, "rejecting: broken-page signature");
            return Verdict::reject(&rule.label);
        }
    }

    let lowered = trimmed.to_lowercase();
    if config.keywords.iter().any(|keyword| lowered.contains(keyword)) {
        return Verdict::accept();
    }

    let long_tokens = trimmed
        .split_whitespace()
        .filter(|token| token.chars().count() > config.density_token_len)
        .count();
    if long_tokens >= config.density_min_tokens && trimmed.chars().count() > config.density_min_chars {
        return Verdict::accept();
    }

    debug!(long_tokens, "rejecting: no educational signal");
    Verdict::reject("no educational signal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config() -> ClassifyConfig {
        ClassifyConfig::default()
    }

    #[test]
    fn test_rejects_javascript_notice() {
        let verdict = validate("You need to have JavaScript enabled to view this content.", &config());
        assert!(!verdict.is_acceptable);
        assert_eq!(verdict.failed_pattern.as_deref(), Some("javascript disabled notice"));
    }

    #[test]
    fn test_accepts_assignment_text() {
        let text = "Assignment: Read chapter 5 and submit a two-page reflection. Due Friday. Worth 50 points.";
        let verdict = validate(text, &config());
        assert!(verdict.is_acceptable);
        assert!(verdict.failed_pattern.is_none());
    }

    #[test]
    fn test_accepts_dense_prose_without_keywords() {
        let text = "wrblx ptkln vexqo ".repeat(25);
        assert!(text.chars().count() > 200);

        let verdict = validate(&text, &config());
        assert!(verdict.is_acceptable);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("short fragment")]
    fn test_rejects_below_minimum_length(#[case] text: &str) {
        let verdict = validate(text, &config());
        assert!(!verdict.is_acceptable);
        assert_eq!(verdict.failed_pattern.as_deref(), Some("below minimum length"));
    }

    #[test]
    fn test_reject_wins_over_keywords() {
        let text = "An error occurred while loading your assignment for this course. Please wait and retry the quiz.";
        let verdict = validate(text, &config());
        assert!(!verdict.is_acceptable);
        assert!(verdict.failed_pattern.is_some());
    }

    #[rstest]
    #[case("Loading... your dashboard will appear shortly, hold on while things spin up over here", "loading placeholder")]
    #[case("Access denied. You do not have permission to view this resource on this server today.", "access denied page")]
    #[case("Page not found. The link you followed may be broken or the page may have been removed.", "missing page")]
    fn test_reject_patterns(#[case] text: &str, #[case] label: &str) {
        let verdict = validate(text, &config());
        assert!(!verdict.is_acceptable);
        assert_eq!(verdict.failed_pattern.as_deref(), Some(label));
    }

    #[test]
    fn test_rejects_long_sparse_text() {
        // Plenty of chars but almost no tokens longer than two chars.
        let text = "ab cd ef ".repeat(30);
        let verdict = validate(&text, &config());
        assert!(!verdict.is_acceptable);
        assert_eq!(verdict.failed_pattern.as_deref(), Some("no educational signal"));
    }

    #[test]
    fn test_thresholds_are_tunable() {
        let strict = ClassifyConfig { min_chars: 500, ..ClassifyConfig::default() };
        let text = "Assignment: Read chapter 5 and submit a two-page reflection. Due Friday. Worth 50 points.";
        assert!(!validate(text, &strict).is_acceptable);
    }
}
