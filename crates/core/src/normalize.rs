//! Whitespace normalization for extracted text.
//!
//! Collapses whitespace runs to single spaces while keeping paragraph
//! boundaries as single newlines. [`normalize`] is idempotent: running it on
//! its own output changes nothing.

use regex::Regex;
use std::sync::LazyLock;

/// Any whitespace run containing a newline becomes one paragraph break.
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]*\n\s*").expect("valid regex"));

/// Any other whitespace run becomes one space.
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Normalizes whitespace in extracted text.
///
/// Runs of spaces and tabs collapse to a single space; runs of whitespace
/// that contain at least one newline collapse to exactly one newline, which
/// the rest of the pipeline treats as a paragraph boundary. Leading and
/// trailing whitespace is trimmed.
///
/// # Example
///
/// ```rust
/// use canvass_core::normalize::normalize;
///
/// let text = "  Read chapter   5.\n\n\n  Submit by Friday.  ";
/// assert_eq!(normalize(text), "Read chapter 5.\nSubmit by Friday.");
/// ```
pub fn normalize(text: &str) -> String {
    let collapsed = PARAGRAPH_BREAK.replace_all(text, "\n");
    let collapsed = SPACE_RUN.replace_all(&collapsed, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(normalize("a   b\t\tc"), "a b c");
    }

    #[test]
    fn test_paragraph_boundaries_become_single_newline() {
        assert_eq!(normalize("first\n\n\nsecond"), "first\nsecond");
        assert_eq!(normalize("first \n \n second"), "first\nsecond");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(normalize("  \n  body  \n  "), "body");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[rstest]
    #[case("Assignment:  read\n\nchapter 5\n")]
    #[case("  lots\t of \n\n\n whitespace \n here ")]
    #[case("already clean text")]
    #[case("line one\nline two\n\nline three")]
    fn test_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }
}
