//! Extracted document output type.
//!
//! [`ExtractedDocument`] is the owned result of one extraction pass: the
//! page title, a heading outline, the merged and cleaned body text, and
//! metadata describing where the text came from. It is handed to the caller
//! (typically an upload collaborator) and never persisted here.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use url::Url;

use crate::Result;
use crate::route::{PageContext, PageKind};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[\w'-]+\b").expect("valid regex"));

/// One entry of the document's structure outline.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Heading text, trimmed.
    pub text: String,
}

/// Metadata attached to an extracted document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    /// Source page URL, when known.
    pub source_url: Option<String>,
    /// Coarse content type detected from the URL.
    pub content_type: PageKind,
    /// Numeric course identifier from the URL, when present.
    pub course_id: Option<String>,
    /// Labels of the selector regions that contributed to the body.
    pub source_labels: BTreeSet<String>,
    /// Word count of the body.
    pub word_count: usize,
    /// Character count of the body.
    pub char_count: usize,
    /// UTC timestamp of the extraction pass.
    pub extracted_at: DateTime<Utc>,
}

/// The complete result of one extraction pass over an LMS page.
///
/// Owned exclusively by the caller that triggered extraction; the pipeline
/// keeps no copy.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    /// Page title.
    pub title: String,
    /// Heading outline in document order.
    pub outline: Vec<Heading>,
    /// Merged, filtered, normalized body text.
    pub body: String,
    /// Extraction metadata.
    pub metadata: DocumentMetadata,
}

impl ExtractedDocument {
    /// Assembles a document, computing counts and URL-derived metadata.
    pub fn new(
        title: String, outline: Vec<Heading>, body: String, source_url: Option<&Url>, source_labels: BTreeSet<String>,
    ) -> Self {
        let context = source_url.map(PageContext::from_url);
        let (content_type, course_id) = match context {
            Some(ctx) => (ctx.kind, ctx.course_id),
            None => (PageKind::Other, None),
        };

        let word_count = count_words(&body);
        let char_count = body.chars().count();

        let metadata = DocumentMetadata {
            source_url: source_url.map(|u| u.to_string()),
            content_type,
            course_id,
            source_labels,
            word_count,
            char_count,
            extracted_at: Utc::now(),
        };

        Self { title, outline, body, metadata }
    }

    /// Serializes the document as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Count words using a simple word-boundary pattern.
fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}
