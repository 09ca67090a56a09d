//! Core error types

use thiserror::Error;

/// Errors raised while parsing the declarative inputs of the core
/// (selectors and observer margins)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A selector string could not be parsed
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A root margin string is not 1-4 pixel lengths
    #[error("invalid root margin `{0}`")]
    InvalidRootMargin(String),
}

impl CoreError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
