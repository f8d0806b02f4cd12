//! HTML parsing and host DOM access.
//!
//! This module provides the [`Page`] type for parsing a saved or live LMS
//! page, and the [`DomRead`] capability trait through which the rest of the
//! pipeline reads DOM state. The pipeline itself never touches `scraper`
//! types directly, so tests (and other hosts) can supply a fake provider.
//!
//! # Example
//!
//! ```rust
//! use canvass_core::dom::{DomRead, Page};
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div id="content"><div class="user_content">Assignment text</div></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let page = Page::parse(html).unwrap();
//! assert!(page.has_match("#content .user_content"));
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::document::Heading;
use crate::{CanvassError, Result};

/// Ancestor tags whose subtrees never contribute fallback content.
const CHROME_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "aside", "noscript", "form"];

/// Class/id fragments that mark an ancestor as page furniture.
const CHROME_MARKERS: &[&str] = &["sidebar", "breadcrumb", "menu", "navigation", "footer", "banner"];

/// Read-only DOM access for the extraction pipeline.
///
/// This is the capability interface the host environment provides. The
/// [`Page`] implementation backs it with a parsed `scraper` document; test
/// code can implement it over canned data instead.
pub trait DomRead {
    /// Rendered text of every element matching a CSS selector, in document order.
    fn region_texts(&self, selector: &str) -> Result<Vec<String>>;

    /// True when the selector matches at least one element.
    fn has_match(&self, selector: &str) -> bool {
        self.region_texts(selector).map(|texts| !texts.is_empty()).unwrap_or(false)
    }

    /// Full visible text of the page (script/style subtrees excluded).
    fn page_text(&self) -> String;

    /// Document title, if any.
    fn page_title(&self) -> Option<String>;

    /// Rendered text of generic text-bearing elements outside chrome
    /// subtrees (nav, header, footer, sidebar and the like).
    fn fallback_texts(&self, tags: &[&str]) -> Vec<String>;

    /// All headings (`h1`..`h6`) in document order.
    fn headings(&self) -> Vec<Heading>;
}

/// A parsed LMS page.
///
/// Wraps an HTML document and provides CSS-selector queries plus the
/// [`DomRead`] capability used by the pipeline.
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use canvass_core::Page;
    ///
    /// let page = Page::parse("<html><head><title>Biology 101</title></head></html>").unwrap();
    /// assert_eq!(page.title(), Some("Biology 101".to_string()));
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`CanvassError::InvalidSelector`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector).map_err(|e| CanvassError::InvalidSelector(format!("{selector}: {e}")))?;

        Ok(self.html.select(&sel).map(|element| Element { element }).collect())
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Gets all visible text of the document.
    ///
    /// Text inside `script` and `style` elements is skipped; `noscript`
    /// content is kept because that is exactly what a script-disabled page
    /// would render.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        for node in self.html.root_element().descendants() {
            if let Some(text) = node.value().as_text() {
                let in_hidden = node
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|el| matches!(el.value().name(), "script" | "style"));
                if !in_hidden {
                    out.push_str(text);
                }
            }
        }
        out
    }
}

impl DomRead for Page {
    fn region_texts(&self, selector: &str) -> Result<Vec<String>> {
        Ok(self.select(selector)?.iter().map(Element::text).collect())
    }

    fn page_text(&self) -> String {
        self.visible_text()
    }

    fn page_title(&self) -> Option<String> {
        self.title()
    }

    fn fallback_texts(&self, tags: &[&str]) -> Vec<String> {
        let mut texts = Vec::new();
        for tag in tags {
            let Ok(elements) = self.select(tag) else { continue };
            for element in elements {
                if element.inside_chrome() {
                    continue;
                }
                texts.push(element.text());
            }
        }
        texts
    }

    fn headings(&self) -> Vec<Heading> {
        let Ok(elements) = self.select("h1, h2, h3, h4, h5, h6") else {
            return Vec::new();
        };

        elements
            .iter()
            .filter_map(|el| {
                let level = el.tag_name().strip_prefix('h')?.parse::<u8>().ok()?;
                let text = el.text().trim().to_string();
                if text.is_empty() { None } else { Some(Heading { level, text }) }
            })
            .collect()
    }
}

/// A single element of a parsed page.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// True when an ancestor of this element is page chrome: a structural
    /// tag like `nav`/`footer`, or anything whose class or id names a
    /// sidebar, menu, or breadcrumb region.
    fn inside_chrome(&self) -> bool {
        self.element.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
            let name = ancestor.value().name();
            if CHROME_TAGS.contains(&name) {
                return true;
            }

            let class = ancestor.value().attr("class").unwrap_or_default().to_lowercase();
            let id = ancestor.value().attr("id").unwrap_or_default().to_lowercase();
            CHROME_MARKERS.iter().any(|marker| class.contains(marker) || id.contains(marker))
        })
    }
}
