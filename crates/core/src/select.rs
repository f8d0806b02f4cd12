//! Priority-ordered content region selection.
//!
//! An LMS page has a handful of places where the actual course material
//! lives, and a sea of chrome around them. The selector walks an ordered
//! rule table from the most specific content containers down to generic
//! landmarks, collecting one [`Candidate`] per matched region. When nothing
//! in the primary tier matches it falls back to a page-wide scan of generic
//! text-bearing tags, and when even that is empty it emits a synthetic
//! candidate holding only the document title, so the collection is never
//! empty.

use tracing::{debug, warn};

use crate::dom::DomRead;

/// Generic text-bearing tags inspected by the fallback scan.
const FALLBACK_TAGS: &[&str] = &[
    "p", "li", "td", "pre", "blockquote", "dd", "dt", "figcaption", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// One selector-to-priority rule of the content rule table.
#[derive(Debug, Clone)]
pub struct SelectorRule {
    /// CSS selector for the content region.
    pub selector: String,
    /// Priority tier; lower is preferred during merging.
    pub priority: u8,
    /// Human label describing the region, carried into document metadata.
    pub label: String,
}

impl SelectorRule {
    /// Creates a rule.
    pub fn new(selector: &str, priority: u8, label: &str) -> Self {
        Self { selector: selector.to_string(), priority, label: label.to_string() }
    }
}

/// Default rule table for Canvas-style pages.
///
/// Tier 1 holds the containers that carry author-written course material;
/// tier 2 the page-type content panes; tier 3 generic landmarks.
pub fn default_rules() -> Vec<SelectorRule> {
    vec![
        SelectorRule::new("#content .user_content", 1, "user content"),
        SelectorRule::new(".description.user_content", 1, "assignment description"),
        SelectorRule::new(".show-content.user_content", 1, "wiki page body"),
        SelectorRule::new("#course_syllabus", 1, "syllabus body"),
        SelectorRule::new("#quiz_show .description", 2, "quiz description"),
        SelectorRule::new(".discussion-section .message", 2, "discussion message"),
        SelectorRule::new("#content", 2, "content pane"),
        SelectorRule::new(".ic-Layout-contentMain", 3, "layout main column"),
        SelectorRule::new("main, [role='main']", 3, "main landmark"),
        SelectorRule::new("article", 3, "article region"),
    ]
}

/// A provisional chunk of extracted text tied to one matched region.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Label of the rule (or scan) that produced this text.
    pub source_label: String,
    /// Trimmed region text.
    pub text: String,
    /// Priority tier inherited from the producing rule.
    pub priority: u8,
}

/// Tunables for candidate collection.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Regions at or below this trimmed length are ignored.
    pub min_region_chars: usize,
    /// Length of the prefix probe used for near-duplicate detection.
    pub dedup_probe_chars: usize,
    /// Candidates at or below this priority count as primary-tier matches.
    pub primary_tier: u8,
    /// Priority assigned to fallback-scan candidates.
    pub fallback_priority: u8,
    /// Priority assigned to the synthetic title candidate.
    pub title_priority: u8,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            min_region_chars: 20,
            dedup_probe_chars: 100,
            primary_tier: 1,
            fallback_priority: 8,
            title_priority: 9,
        }
    }
}

/// Collects extraction candidates from the page.
///
/// Rules are scanned in ascending priority order (stable within a tier), so
/// when two overlapping regions duplicate each other the preferred one is
/// the one that survives the near-duplicate check. The returned sequence is
/// never empty.
pub fn collect_candidates(host: &impl DomRead, rules: &[SelectorRule], config: &SelectConfig) -> Vec<Candidate> {
    let mut ordered: Vec<&SelectorRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority);

    let mut kept: Vec<Candidate> = Vec::new();
    for rule in ordered {
        let texts = match host.region_texts(&rule.selector) {
            Ok(texts) => texts,
            Err(e) => {
                warn!(selector = %rule.selector, error = %e, "skipping selector rule");
                continue;
            }
        };

        for text in texts {
            try_keep(&mut kept, &text, rule.priority, &rule.label, config);
        }
    }

    if !kept.iter().any(|c| c.priority <= config.primary_tier) {
        debug!("no primary-tier candidate; running fallback scan");
        for text in host.fallback_texts(FALLBACK_TAGS) {
            try_keep(&mut kept, &text, config.fallback_priority, "page scan", config);
        }
    }

    if kept.is_empty() {
        let title = host.page_title().unwrap_or_default();
        kept.push(Candidate {
            source_label: "document title".to_string(),
            text: title.trim().to_string(),
            priority: config.title_priority,
        });
    }

    debug!(candidates = kept.len(), "candidate collection finished");
    kept
}

fn try_keep(kept: &mut Vec<Candidate>, text: &str, priority: u8, label: &str, config: &SelectConfig) {
    let trimmed = text.trim();
    if trimmed.chars().count() <= config.min_region_chars {
        return;
    }
    if is_near_duplicate(trimmed, kept, config.dedup_probe_chars) {
        return;
    }

    kept.push(Candidate { source_label: label.to_string(), text: trimmed.to_string(), priority });
}

/// Near-duplicate check against already kept candidates.
///
/// Two regions count as duplicates when either one's opening probe (first
/// `probe_chars` chars) appears inside the other. This is a coarse
/// heuristic: it can merge distinct paragraphs that share a long boilerplate
/// opening and it cannot see reordered duplicates.
fn is_near_duplicate(text: &str, kept: &[Candidate], probe_chars: usize) -> bool {
    let probe = prefix(text, probe_chars);
    kept.iter()
        .any(|candidate| candidate.text.contains(probe) || text.contains(prefix(&candidate.text, probe_chars)))
}

/// First `n` chars of `text`, on a char boundary.
fn prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
