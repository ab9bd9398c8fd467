//! Candidate inputs and per-candidate ranking outcomes.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Marker appended to every preview.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// One document to score against the reference text.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Identifier echoed back in the result (usually a filename).
    pub id: String,

    /// Where the candidate's text comes from.
    pub source: CandidateSource,
}

impl Candidate {
    /// A candidate whose text is already extracted.
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: CandidateSource::Text(text.into()),
        }
    }

    /// A candidate that must go through media-type checks and extraction.
    pub fn document(
        id: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            id: id.into(),
            source: CandidateSource::Document {
                media_type: media_type.into(),
                bytes: bytes.into(),
            },
        }
    }
}

/// Text source of a candidate.
#[derive(Debug, Clone)]
pub enum CandidateSource {
    /// Pre-extracted text.
    Text(String),

    /// Raw document bytes with their declared media type.
    Document { media_type: String, bytes: Bytes },
}

/// Outcome status reported for each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateStatus {
    #[serde(rename = "Success")]
    Success,

    /// Declared media type is not an accepted document type.
    #[serde(rename = "Skipped (Not PDF)")]
    SkippedNotDocument,

    /// Extraction failed or produced too little text.
    #[serde(rename = "Error (Empty PDF)")]
    EmptyOrInvalidContent,

    /// The provider failed or the vector could not be compared.
    #[serde(rename = "Error (Embedding Failed)")]
    EmbeddingFailed,
}

impl CandidateStatus {
    /// Wire label of this status.
    pub fn label(self) -> &'static str {
        match self {
            CandidateStatus::Success => "Success",
            CandidateStatus::SkippedNotDocument => "Skipped (Not PDF)",
            CandidateStatus::EmptyOrInvalidContent => "Error (Empty PDF)",
            CandidateStatus::EmbeddingFailed => "Error (Embedding Failed)",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Terminal state of one candidate. Every candidate reaches exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// Embedded and compared against the reference.
    Scored { score: f32, preview: String },
    /// Not an accepted document type; never extracted or embedded.
    Skipped { detail: String },
    /// Extraction failed or the text is shorter than the minimum.
    InvalidContent { detail: String },
    /// The provider failed or the vector could not be compared.
    EmbeddingFailed { detail: String },
}

impl CandidateOutcome {
    /// Status reported for this outcome.
    pub fn status(&self) -> CandidateStatus {
        match self {
            CandidateOutcome::Scored { .. } => CandidateStatus::Success,
            CandidateOutcome::Skipped { .. } => CandidateStatus::SkippedNotDocument,
            CandidateOutcome::InvalidContent { .. } => CandidateStatus::EmptyOrInvalidContent,
            CandidateOutcome::EmbeddingFailed { .. } => CandidateStatus::EmbeddingFailed,
        }
    }

    /// Attach the identifier and flatten into the reported record.
    /// Non-scored outcomes always carry a score of exactly zero.
    pub fn into_scored(self, identifier: String) -> ScoredCandidate {
        let status = self.status();
        match self {
            CandidateOutcome::Scored { score, preview } => ScoredCandidate {
                identifier,
                score,
                preview: Some(preview),
                status,
                detail: None,
            },
            CandidateOutcome::Skipped { detail }
            | CandidateOutcome::InvalidContent { detail }
            | CandidateOutcome::EmbeddingFailed { detail } => ScoredCandidate {
                identifier,
                score: 0.0,
                preview: None,
                status,
                detail: Some(detail),
            },
        }
    }
}

/// A ranked result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "filename")]
    pub identifier: String,

    /// Cosine similarity × 100, or 0 for skipped/failed candidates.
    pub score: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,

    pub status: CandidateStatus,

    /// Cause of a skip or failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ScoredCandidate {
    /// Whether the candidate was scored.
    pub fn is_success(&self) -> bool {
        self.status == CandidateStatus::Success
    }
}

/// First `max_chars` characters of the trimmed text followed by
/// [`PREVIEW_ELLIPSIS`]. Never splits a character.
pub fn make_preview(text: &str, max_chars: usize) -> String {
    let head: String = text.trim().chars().take(max_chars).collect();
    format!("{head}{PREVIEW_ELLIPSIS}")
}
