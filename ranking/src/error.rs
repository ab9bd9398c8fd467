//! Error types for the ranking pipeline.

use smartfit_embeddings::EmbeddingError;
use thiserror::Error;

/// Result type alias for ranking operations.
pub type Result<T> = std::result::Result<T, RankingError>;

/// Errors that abort a whole ranking call or its setup.
///
/// Per-candidate problems never appear here; they become a
/// [`CandidateStatus`](crate::CandidateStatus) on the candidate's row.
#[derive(Error, Debug)]
pub enum RankingError {
    /// The reference text could not be embedded, so nothing can be ranked.
    #[error("failed to embed reference text: {0}")]
    ReferenceEmbedding(#[source] EmbeddingError),

    /// The provider returned vectors of different sizes within one call.
    #[error(
        "candidate '{candidate}' embedding has {actual} dimensions, reference has {expected}"
    )]
    DimensionMismatch {
        candidate: String,
        expected: usize,
        actual: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
