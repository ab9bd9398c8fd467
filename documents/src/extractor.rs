//! Text extractors.
//!
//! A [`DocumentExtractor`] turns raw document bytes into plain text or fails
//! explicitly. Zero-length input always fails rather than producing text.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::{ExtractionError, Result};
use crate::media::{PDF_MEDIA_TYPE, TEXT_MEDIA_TYPE, normalize_media_type};

/// Converts document bytes of a declared media type into text.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Whether this extractor handles `media_type`.
    fn supports(&self, media_type: &str) -> bool;

    /// Extract the text of a document.
    async fn extract(&self, media_type: &str, bytes: Bytes) -> Result<String>;
}

/// Extracts the text of every page of a PDF, pages separated by newlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    fn extract_blocking(bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    fn supports(&self, media_type: &str) -> bool {
        normalize_media_type(media_type) == PDF_MEDIA_TYPE
    }

    async fn extract(&self, media_type: &str, bytes: Bytes) -> Result<String> {
        if !self.supports(media_type) {
            return Err(ExtractionError::UnsupportedMediaType(media_type.to_string()));
        }
        if bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let size = bytes.len();
        // Parsing is CPU bound; a panicking parser surfaces as a task error.
        let text = tokio::task::spawn_blocking(move || Self::extract_blocking(&bytes))
            .await
            .map_err(|e| {
                warn!("PDF extraction task failed: {e}");
                ExtractionError::Task(e.to_string())
            })??;

        debug!("Extracted {} characters from {size}-byte PDF", text.chars().count());
        Ok(text)
    }
}

/// Passes UTF-8 plain text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    fn supports(&self, media_type: &str) -> bool {
        normalize_media_type(media_type) == TEXT_MEDIA_TYPE
    }

    async fn extract(&self, media_type: &str, bytes: Bytes) -> Result<String> {
        if !self.supports(media_type) {
            return Err(ExtractionError::UnsupportedMediaType(media_type.to_string()));
        }
        if bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// Dispatches to the first extractor that supports the media type.
pub struct CompositeExtractor {
    extractors: Vec<Box<dyn DocumentExtractor>>,
}

impl CompositeExtractor {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Add an extractor. Earlier extractors win.
    pub fn with(mut self, extractor: impl DocumentExtractor + 'static) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// PDF and plain text.
    pub fn with_defaults() -> Self {
        Self::new().with(PdfExtractor).with(PlainTextExtractor)
    }
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl DocumentExtractor for CompositeExtractor {
    fn supports(&self, media_type: &str) -> bool {
        self.extractors.iter().any(|e| e.supports(media_type))
    }

    async fn extract(&self, media_type: &str, bytes: Bytes) -> Result<String> {
        let extractor = self
            .extractors
            .iter()
            .find(|e| e.supports(media_type))
            .ok_or_else(|| ExtractionError::UnsupportedMediaType(media_type.to_string()))?;
        extractor.extract(media_type, bytes).await
    }
}
