//! Error types for snippet assembly
//!
//! Every failure at this layer is a value the caller can inspect; nothing here
//! panics or produces a partially rendered script.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnippetError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnippetError {
    /// The language identifier has no Synvert dialect
    #[error("unsupported language '{0}' (expected one of: ruby, javascript, typescript)")]
    UnsupportedLanguage(String),

    /// The extension is not one the language accepts
    #[error("unsupported extension '{extension}' for {language} (expected one of: {expected})")]
    UnsupportedExtension {
        language: String,
        extension: String,
        expected: String,
    },

    /// A version field could not be split into subject and version spec
    #[error("malformed {field} '{raw}': {reason}")]
    MalformedConstraint {
        field: &'static str,
        raw: String,
        reason: &'static str,
    },

    /// A field that is emitted inside a quoted literal spans several lines
    #[error("{field} '{raw}' must not contain line breaks or control characters")]
    ControlCharacter { field: &'static str, raw: String },

    /// The remote snippet generator failed or answered with garbage
    #[error("snippet provider error: {0}")]
    Provider(String),

    /// The snippet generator endpoint is not a usable URL
    #[error("invalid snippet generator endpoint '{0}'")]
    InvalidEndpoint(String),
}

impl SnippetError {
    pub fn malformed(field: &'static str, raw: impl Into<String>, reason: &'static str) -> Self {
        SnippetError::MalformedConstraint {
            field,
            raw: raw.into(),
            reason,
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        SnippetError::Provider(message.into())
    }
}
