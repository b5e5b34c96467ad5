//! Search and indexing exchange types.

use serde::{Deserialize, Serialize};

/// An embedding request understood by the vector service: the text to embed
/// plus the model that should embed it. The service performs the inference;
/// this type only carries the normalized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Embedding model identifier.
    pub model: String,
    /// Whitespace-normalized text.
    pub text: String,
}

/// A point ready for upsert: identifier, embedding input, and the record
/// payload stored alongside the vector.
#[derive(Debug, Clone)]
pub struct IndexPoint {
    /// Integer identifier, assigned by enumeration order at indexing time.
    pub id: u64,
    /// Text + model pair the vector service embeds on ingestion.
    pub embedding: EmbeddingRequest,
    /// Record payload returned verbatim by searches.
    pub payload: serde_json::Value,
}

/// One ranked search result: the stored payload and its similarity score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: u64,
    pub score: f32,
    pub payload: serde_json::Value,
}
