//! Domain models.

pub mod answer;
pub mod config;
pub mod record;
pub mod search;

pub use answer::{AnswerRecord, Completion, Relevance, TokenUsage};
pub use config::{
    Config, DatabaseConfig, EmbeddingConfig, IngestConfig, LlmConfig, LoggingConfig, QdrantConfig,
    RetrievalConfig, RetryConfig, ServerConfig,
};
pub use record::MenuRecord;
pub use search::{EmbeddingRequest, IndexPoint, SearchHit};
