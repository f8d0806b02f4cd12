//! Page context derived from the current URL.
//!
//! LMS URLs encode both the course and the kind of page being viewed
//! (`/courses/101/assignments/42`, `/courses/101/quizzes/7`, ...). The
//! pipeline uses this to tag extracted documents with a coarse content type
//! and the owning course.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

static COURSE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/courses/(\d+)").expect("valid regex"));

/// Coarse content type of an LMS page, detected from URL path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Assignment,
    Quiz,
    Discussion,
    Page,
    Module,
    Announcement,
    Syllabus,
    Grades,
    File,
    Other,
}

impl PageKind {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Assignment => "assignment",
            PageKind::Quiz => "quiz",
            PageKind::Discussion => "discussion",
            PageKind::Page => "page",
            PageKind::Module => "module",
            PageKind::Announcement => "announcement",
            PageKind::Syllabus => "syllabus",
            PageKind::Grades => "grades",
            PageKind::File => "file",
            PageKind::Other => "other",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL-derived context for one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// Detected content type.
    pub kind: PageKind,
    /// Numeric course identifier, when the URL carries one.
    pub course_id: Option<String>,
}

impl PageContext {
    /// Derives the page context from a URL.
    ///
    /// The syllabus check runs before the assignment check because Canvas
    /// serves the syllabus under `/assignments/syllabus`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use canvass_core::route::{PageContext, PageKind};
    /// use url::Url;
    ///
    /// let url = Url::parse("https://school.instructure.com/courses/101/assignments/42").unwrap();
    /// let context = PageContext::from_url(&url);
    /// assert_eq!(context.kind, PageKind::Assignment);
    /// assert_eq!(context.course_id.as_deref(), Some("101"));
    /// ```
    pub fn from_url(url: &Url) -> Self {
        let path = url.path().to_lowercase();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let has = |segment: &str| segments.iter().any(|s| *s == segment);

        let kind = if has("syllabus") {
            PageKind::Syllabus
        } else if has("assignments") {
            PageKind::Assignment
        } else if has("quizzes") {
            PageKind::Quiz
        } else if has("discussion_topics") || has("discussions") {
            PageKind::Discussion
        } else if has("announcements") {
            PageKind::Announcement
        } else if has("modules") {
            PageKind::Module
        } else if has("grades") {
            PageKind::Grades
        } else if has("files") {
            PageKind::File
        } else if has("pages") || has("wiki") {
            PageKind::Page
        } else {
            PageKind::Other
        };

        let course_id = COURSE_ID
            .captures(&path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        Self { kind, course_id }
    }
}
