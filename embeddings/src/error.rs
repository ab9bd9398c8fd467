//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while producing or comparing embeddings.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Input text is empty after trimming; no provider call was made.
    #[error("input text is empty")]
    EmptyInput,

    /// Provider credential is missing.
    #[error("embedding provider '{provider}' is not configured (missing API key)")]
    ProviderNotConfigured { provider: String },

    /// Provider rejected the credential.
    #[error("provider rejected credentials: {0}")]
    Unauthorized(String),

    /// Rate limit or quota exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Provider returned a non-success status.
    #[error("API request failed with status {status}: {message}")]
    ApiRequest { status: u16, message: String },

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Provider did not answer within the per-call timeout.
    #[error("embedding request timed out")]
    Timeout,

    /// Transport-level HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Similarity is undefined for a zero-magnitude or empty vector.
    #[error("similarity is undefined for a zero or empty vector")]
    DegenerateVector,
}

impl EmbeddingError {
    /// Map a transport error, separating elapsed timeouts from other failures.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}
