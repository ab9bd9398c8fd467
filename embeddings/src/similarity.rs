//! Similarity computation for embeddings.

use crate::error::{EmbeddingError, Result};

/// Compute the dot product between two embeddings.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Euclidean length of a vector.
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite vectors
///
/// Fails with [`EmbeddingError::DegenerateVector`] when either vector is
/// empty or has zero magnitude, since the angle is undefined.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    let dot = dot_product(a, b)?;
    if a.is_empty() {
        return Err(EmbeddingError::DegenerateVector);
    }

    let denominator = magnitude(a) * magnitude(b);
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(EmbeddingError::DegenerateVector);
    }

    let cosine = dot / denominator;
    if !cosine.is_finite() {
        return Err(EmbeddingError::DegenerateVector);
    }

    // Rounding can push parallel vectors a hair past 1.0.
    Ok(cosine.clamp(-1.0, 1.0))
}

/// Cosine similarity scaled to a percentage in [-100, 100].
pub fn similarity_percent(a: &[f32], b: &[f32]) -> Result<f32> {
    Ok(cosine_similarity(a, b)? * 100.0)
}
