//! Vector service port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{EmbeddingRequest, IndexPoint, SearchHit};

/// Operations the core consumes from the vector service.
///
/// The service owns embedding inference: both `upsert_batch` and `query`
/// carry (text, model) pairs instead of raw vectors.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Whether a collection with this name exists.
    async fn collection_exists(&self, name: &str) -> DomainResult<bool>;

    /// Create a collection with cosine similarity and the given vector
    /// dimensionality. If a collection with this name already exists it is
    /// deleted first — all of its points are irrecoverably lost. Callers
    /// that cannot afford replacement must check `collection_exists` first.
    async fn create_collection(&self, name: &str, vector_size: u64) -> DomainResult<()>;

    /// Upsert one batch of points in a single call.
    async fn upsert_batch(&self, name: &str, points: Vec<IndexPoint>) -> DomainResult<()>;

    /// Top-k similarity search. Returns at most `limit` hits ordered by
    /// descending similarity, payloads included.
    async fn query(
        &self,
        name: &str,
        query: EmbeddingRequest,
        limit: usize,
    ) -> DomainResult<Vec<SearchHit>>;
}
