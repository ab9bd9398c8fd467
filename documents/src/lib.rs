//! # Documents
//!
//! Text extraction for candidate documents. Given raw bytes and a declared
//! media type, an extractor returns the document's text or fails explicitly.
//!
//! ```text
//! bytes + media type ──► CompositeExtractor ──► PdfExtractor / PlainTextExtractor ──► String
//! ```

pub mod error;
pub mod extractor;
pub mod media;

pub use error::{ExtractionError, Result};
pub use extractor::{CompositeExtractor, DocumentExtractor, PdfExtractor, PlainTextExtractor};
pub use media::{
    PDF_MEDIA_TYPE, TEXT_MEDIA_TYPE, guess_media_type, is_accepted, normalize_media_type,
};
