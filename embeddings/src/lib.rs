//! # Embeddings
//!
//! This crate turns text into dense vectors and compares them for the
//! SmartFit ranking pipeline.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors via Gemini or OpenAI
//! - **Offline Provider**: Deterministic feature hashing for tests and air-gapped runs
//! - **Similarity**: Cosine similarity with explicit degenerate-vector errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► EmbeddingResponse ──► similarity_percent │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Gemini / OpenAI / Hashing                                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod gemini;
pub mod hashing;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use gemini::{GEMINI_API_KEY_ENV, GeminiProvider, TaskType};
pub use hashing::HashingProvider;
pub use provider::{
    DEFAULT_TIMEOUT, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, OpenAIProvider,
    validate_input,
};
pub use similarity::{cosine_similarity, dot_product, magnitude, similarity_percent};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 768; // Gemini text-embedding-004
