//! Savor — retrieval-augmented question answering over a restaurant and
//! menu-item corpus.
//!
//! A question enters through the HTTP API or the CLI, the retrieval engine
//! pulls the most similar restaurant–menu records from a Qdrant collection,
//! and the answer composer asks a language model to answer from that
//! context alone, self-evaluates the answer's relevance with a second call,
//! and accounts for tokens, cost, and latency.
//!
//! # Architecture
//!
//! - **Domain** (`domain`): models, ports, and errors
//! - **Ingest** (`ingest`): tabular corpus loading and embedding preparation
//! - **Services** (`services`): retrieval, indexing, composition, pricing
//! - **Infrastructure** (`infrastructure`): Qdrant, chat-completions,
//!   SQLite, configuration, and the HTTP API
//! - **CLI** (`cli`): `serve`, `ask`, and `index` commands

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod ingest;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AnswerRecord, Completion, Config, EmbeddingRequest, IndexPoint, MenuRecord, Relevance,
    SearchHit, TokenUsage,
};
pub use domain::ports::{ChatModel, ConversationRepository, VectorStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AnswerComposer, Engines, IndexingTask, RetrievalEngine};
