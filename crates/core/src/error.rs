//! Error types for canvass operations.
//!
//! This module defines the main error type [`CanvassError`] which represents
//! the unexpected failures that can occur while evaluating selectors or
//! serializing a document. Expected "bad page" conditions (boilerplate, too
//! little text) are never errors; they surface as a rejected
//! [`crate::classify::Verdict`].

use thiserror::Error;

/// Main error type for extraction operations.
///
/// # Example
///
/// ```rust
/// use canvass_core::{CanvassError, Page};
///
/// let page = Page::parse("<html><body></body></html>").unwrap();
/// match page.select("[[not-a-selector") {
///     Ok(_) => unreachable!(),
///     Err(CanvassError::InvalidSelector(msg)) => assert!(!msg.is_empty()),
///     Err(e) => panic!("unexpected error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum CanvassError {
    /// A CSS selector string could not be parsed.
    ///
    /// Returned when a selector rule or ready marker contains invalid
    /// selector syntax. Rules with invalid selectors contribute zero
    /// candidates; the pipeline logs and continues.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Serialization errors when converting a document to JSON.
    #[error("Failed to serialize document: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Result type alias for CanvassError.
pub type Result<T> = std::result::Result<T, CanvassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CanvassError::InvalidSelector("[[bad".to_string());
        assert!(err.to_string().contains("Invalid selector"));
    }

    #[test]
    fn test_serialize_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = CanvassError::from(source);

        assert!(matches!(err, CanvassError::SerializeError(_)));
        assert!(err.to_string().contains("Failed to serialize"));
    }
}
