//! Offline feature-hashing provider.
//!
//! Each lower-cased alphanumeric token is hashed into one of `dimension`
//! buckets with a hash-derived sign. Texts sharing vocabulary point in
//! similar directions, which is enough for offline runs and tests. Vectors
//! are deterministic for a given build.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::Embedding;
use crate::error::Result;
use crate::provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, validate_input};

/// Deterministic bag-of-words embedder that needs no network or credential.
#[derive(Debug, Clone)]
pub struct HashingProvider {
    dimension: usize,
}

impl HashingProvider {
    /// Create a provider producing vectors of `dimension` entries.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn vectorize(text: &str, dimension: usize) -> Embedding {
        let mut vector = vec![0.0f32; dimension];
        for token in tokenize(text) {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let hash = hasher.finish();
            let bucket = (hash % dimension as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        vector
    }
}

impl Default for HashingProvider {
    fn default() -> Self {
        Self::new(crate::DEFAULT_DIMENSION)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[async_trait]
impl EmbeddingProvider for HashingProvider {
    fn name(&self) -> &str {
        "hashing"
    }

    fn default_model(&self) -> &str {
        "feature-hashing"
    }

    fn default_dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        validate_input(&request.text)?;

        let dimension = request.dimensions.unwrap_or(self.dimension).max(1);
        let embedding = Self::vectorize(&request.text, dimension);

        Ok(EmbeddingResponse {
            tokens_used: Some(tokenize(&request.text).count() as u64),
            dimension,
            embedding,
            model: self.default_model().to_string(),
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}
