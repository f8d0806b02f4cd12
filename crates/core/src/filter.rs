//! Navigation boilerplate removal.
//!
//! LMS pages wrap course material in a thick layer of chrome: skip links,
//! global navigation labels, breadcrumb togglers. [`strip_boilerplate`]
//! removes those strings with an ordered list of case-insensitive pattern
//! substitutions before the text reaches the classifier.

use regex::Regex;
use std::sync::LazyLock;

/// Ordered substitution patterns, applied with an empty replacement.
///
/// Own-line label patterns keep their trailing newline so removals never
/// splice two unrelated lines together; leftover blank lines are collapsed
/// by the normalizer.
static NAV_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)skip to (?:main )?content",
        r"(?im)^[ \t]*(?:home|dashboard|courses|calendar|inbox|history|help|account|logout)[ \t]*$",
        r"(?im)^[ \t]*(?:modules|grades|people|pages|files|syllabus|quizzes|assignments|discussions|announcements|rubrics|collaborations|attendance)[ \t]*$",
        r"(?im)^[ \t]*(?:previous|next)[ \t]*$",
        r"(?i)toggle (?:course )?navigation(?: menu)?",
        r"(?i)minimi[sz]e global navigation",
        r"(?i)close[ \t]*sidebar",
        r"(?i)view all pages",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Strips known navigation boilerplate from extracted text.
///
/// Pure and stateless. The substitution pass runs to a fixpoint, so applying
/// the function to its own output is a no-op.
///
/// # Example
///
/// ```rust
/// use canvass_core::filter::strip_boilerplate;
///
/// let text = "Skip To Content\nDashboard\nRead chapter 5 before the quiz.";
/// assert_eq!(strip_boilerplate(text).trim(), "Read chapter 5 before the quiz.");
/// ```
pub fn strip_boilerplate(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let mut stripped = text.to_string();
    for pattern in NAV_PATTERNS.iter() {
        stripped = pattern.replace_all(&stripped, "").into_owned();
    }
    stripped.trim().to_string()
}
