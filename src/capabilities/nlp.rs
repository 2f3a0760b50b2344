//! NLP capability port: named entities and noun-phrase chunks.
//!
//! No default engine ships with the crate. When the slot is empty the
//! analyzer degrades to its regex key-phrase fallback and an empty entity
//! list.

use thiserror::Error;

use crate::models::Entity;

/// Errors from NLP engines.
#[derive(Debug, Error)]
pub enum NlpError {
    #[error("NLP engine not available: {0}")]
    Unavailable(String),

    #[error("NLP processing failed: {0}")]
    Failed(String),
}

/// Trait for NLP engines providing entity recognition and noun-phrase
/// chunking.
pub trait NlpCapability: Send + Sync {
    /// Engine identifier.
    fn name(&self) -> &str;

    /// Check if this engine can run.
    fn is_available(&self) -> bool;

    /// Extract named entities with char offsets and confidences.
    fn entities(&self, text: &str) -> Result<Vec<Entity>, NlpError>;

    /// Extract noun-phrase chunks in document order.
    fn noun_chunks(&self, text: &str) -> Result<Vec<String>, NlpError>;
}
