//! Embedding capability port and vector utilities.
//!
//! The default engine is a deterministic token-hash embedder: a
//! bag-of-words vector over hashed tokens, L2-normalized. It needs no model
//! or network, and identical text always embeds to the identical vector.
//! Model-backed engines plug in behind the same trait.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use thiserror::Error;

/// Standard embedding dimensionality for the default engine.
pub const EMBEDDING_DIM: usize = 384;

/// Errors from embedding engines.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding engine not available: {0}")]
    Unavailable(String),

    #[error("embedding failed: {0}")]
    Failed(String),
}

/// Trait for embedding engines.
pub trait EmbeddingCapability: Send + Sync {
    /// Engine identifier.
    fn name(&self) -> &str;

    /// Embedding vector dimensionality.
    fn dims(&self) -> usize;

    /// Encode text into a fixed-length vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Deterministic token-hash embedder.
pub struct HashEmbedder {
    dims: usize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self {
            dims: EMBEDDING_DIM,
        }
    }

    pub fn with_dims(dims: usize) -> Self {
        Self { dims }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingCapability for HashEmbedder {
    fn name(&self) -> &str {
        "token-hash"
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vec = vec![0.0f32; self.dims];

        for token in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            let bucket = (hasher.finish() % self.dims as u64) as usize;
            vec[bucket] += 1.0;
        }

        // L2 normalize
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut vec {
                *val /= norm;
            }
        }

        Ok(vec)
    }
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for empty vectors or vectors of
/// different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
