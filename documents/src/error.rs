//! Error types for document text extraction.

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while turning a document into text.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document has no bytes.
    #[error("document is empty")]
    EmptyDocument,

    /// No extractor handles this media type.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The PDF could not be parsed.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The document is not valid UTF-8 text.
    #[error("invalid text encoding: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The blocking extraction task failed.
    #[error("extraction task failed: {0}")]
    Task(String),
}
