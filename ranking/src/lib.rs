//! # Ranking Engine
//!
//! Scores a set of candidate documents against one reference text by
//! semantic similarity and returns them best match first.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Ranker                                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  reference text ──► EmbeddingProvider ──► reference vector      │
//! │                                                 │               │
//! │  Candidate ──► media check ──► DocumentExtractor│               │
//! │                    │                 │          ▼               │
//! │                 Skipped        length check ──► cosine × 100    │
//! │                                      │                          │
//! │                                Error (Empty PDF)                │
//! │                                                                 │
//! │  ScoredCandidate rows, sorted by score descending               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smartfit_ranking::{Candidate, Ranker, RankingConfig};
//!
//! let ranker = Ranker::from_config(&RankingConfig::load(None)?)?;
//!
//! let results = ranker
//!     .rank(job_description, vec![Candidate::document("cv.pdf", "application/pdf", bytes)])
//!     .await?;
//! ```

pub mod candidate;
pub mod config;
pub mod engine;
pub mod error;

pub use candidate::{
    Candidate, CandidateOutcome, CandidateSource, CandidateStatus, PREVIEW_ELLIPSIS,
    ScoredCandidate, make_preview,
};
pub use config::{EmbeddingConfig, EmbeddingProviderType, RankingConfig, RankingSettings};
pub use engine::{Ranker, RankerBuilder};
pub use error::{RankingError, Result};

// Re-export from dependencies for convenience
pub use smartfit_documents::{DocumentExtractor, ExtractionError};
pub use smartfit_embeddings::{EmbeddingError, EmbeddingProvider};
