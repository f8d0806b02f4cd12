pub mod classify;
pub mod document;
pub mod dom;
pub mod error;
pub mod extract;
pub mod filter;
#[cfg(feature = "gate")]
pub mod gate;
pub mod normalize;
pub mod route;
pub mod select;

pub use classify::{ClassifyConfig, RejectRule, Verdict, validate};
pub use document::{DocumentMetadata, ExtractedDocument, Heading};
pub use dom::{DomRead, Element, Page};
pub use error::{CanvassError, Result};
pub use extract::{ExtractConfig, ExtractConfigBuilder, Extractor, extract_document, validate_text};
pub use filter::strip_boilerplate;
#[cfg(feature = "gate")]
pub use gate::{GateConfig, await_content_ready};
pub use normalize::normalize;
pub use route::{PageContext, PageKind};
pub use select::{Candidate, SelectConfig, SelectorRule, collect_candidates, default_rules};
