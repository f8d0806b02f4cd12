//! Pipeline orchestration.
//!
//! This module provides the primary API for turning a rendered LMS page
//! into a validated [`ExtractedDocument`]. The main entry point is the
//! [`Extractor`] struct, along with the convenience functions
//! [`extract_document`] and [`validate_text`].
//!
//! One pass runs: candidate collection by selector priority, merge in
//! ascending priority order, navigation-boilerplate stripping, whitespace
//! normalization, then metadata assembly. Validation is a separate call so
//! the caller decides what a rejection means for its user.
//!
//! # Example
//!
//! ```rust
//! use canvass_core::{Extractor, Page};
//!
//! let html = r#"
//!     <html><head><title>Week 3</title></head><body>
//!         <div id="content"><div class="user_content">
//!             <p>Assignment: read chapter 5 and submit a reflection. Worth 50 points.</p>
//!         </div></div>
//!     </body></html>
//! "#;
//!
//! let page = Page::parse(html).unwrap();
//! let extractor = Extractor::new();
//! let document = extractor.extract(&page, None);
//! let verdict = extractor.validate(&document.body);
//! assert!(verdict.is_acceptable);
//! ```

use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

use crate::classify::{ClassifyConfig, Verdict, validate};
use crate::document::ExtractedDocument;
use crate::dom::DomRead;
#[cfg(feature = "gate")]
use crate::gate::{GateConfig, await_content_ready};
use crate::filter::strip_boilerplate;
use crate::normalize::normalize;
use crate::select::{SelectConfig, SelectorRule, collect_candidates, default_rules};

/// Configuration for a full extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Ordered selector rule table.
    pub rules: Vec<SelectorRule>,
    /// Candidate collection tunables.
    pub select: SelectConfig,
    /// Classifier tunables.
    pub classify: ClassifyConfig,
    /// Page-load gate tunables.
    #[cfg(feature = "gate")]
    pub gate: GateConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            select: SelectConfig::default(),
            classify: ClassifyConfig::default(),
            #[cfg(feature = "gate")]
            gate: GateConfig::default(),
        }
    }
}

impl ExtractConfig {
    /// Creates a new builder.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for [`ExtractConfig`].
///
/// # Example
///
/// ```rust
/// use canvass_core::ExtractConfig;
///
/// let config = ExtractConfig::builder().min_chars(100).dedup_probe_chars(80).build();
/// assert_eq!(config.classify.min_chars, 100);
/// ```
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    /// Replaces the selector rule table.
    pub fn rules(mut self, rules: Vec<SelectorRule>) -> Self {
        self.config.rules = rules;
        self
    }

    /// Sets the classifier's minimum acceptable length.
    pub fn min_chars(mut self, value: usize) -> Self {
        self.config.classify.min_chars = value;
        self
    }

    /// Sets the near-duplicate probe length.
    pub fn dedup_probe_chars(mut self, value: usize) -> Self {
        self.config.select.dedup_probe_chars = value;
        self
    }

    /// Sets the page-load gate timeout.
    #[cfg(feature = "gate")]
    pub fn gate_timeout(mut self, value: std::time::Duration) -> Self {
        self.config.gate.timeout = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One extraction session over a page.
///
/// Construct one per page load and drop it on teardown; the extractor holds
/// only configuration, so each [`Extractor::extract`] call is an independent
/// pure pass over the host's current DOM state.
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor with the default configuration.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Gets the active configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Runs one extraction pass over the host's current DOM state.
    ///
    /// Never fails for expected bad-page shapes: unmatched selectors yield
    /// zero candidates and an empty page yields a title-only document that
    /// the classifier will reject.
    pub fn extract(&self, host: &impl DomRead, source_url: Option<&Url>) -> ExtractedDocument {
        let mut candidates = collect_candidates(host, &self.config.rules, &self.config.select);

        // Stable sort: encounter order is the tie-break within a tier.
        candidates.sort_by_key(|candidate| candidate.priority);

        let source_labels: BTreeSet<String> = candidates.iter().map(|c| c.source_label.clone()).collect();
        let merged = candidates.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n\n");

        let body = normalize(&strip_boilerplate(&merged));
        let title = host.page_title().unwrap_or_default();
        let outline = host.headings();

        debug!(
            chars = body.chars().count(),
            regions = source_labels.len(),
            "extraction pass finished"
        );

        ExtractedDocument::new(title, outline, body, source_url, source_labels)
    }

    /// Waits for the page-load gate, then extracts.
    #[cfg(feature = "gate")]
    pub async fn extract_when_ready(&self, host: &impl DomRead, source_url: Option<&Url>) -> ExtractedDocument {
        await_content_ready(host, &self.config.gate).await;
        self.extract(host, source_url)
    }

    /// Classifies text with this extractor's configuration.
    pub fn validate(&self, text: &str) -> Verdict {
        validate(text, &self.config.classify)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts a document with the default configuration.
pub fn extract_document(host: &impl DomRead, source_url: Option<&Url>) -> ExtractedDocument {
    Extractor::new().extract(host, source_url)
}

/// Classifies text with the default configuration.
pub fn validate_text(text: &str) -> Verdict {
    validate(text, &ClassifyConfig::default())
}
