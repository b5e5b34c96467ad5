//! Domain errors for the Savor answer pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors that can occur in the Savor system.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An ingestion input file is missing. Fatal to indexing, irrelevant to
    /// querying a collection that already exists.
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// An ingestion input exists but cannot be parsed.
    #[error("Invalid source data: {0}")]
    InvalidSource(String),

    /// The vector service or the language-model provider is unreachable or
    /// returned an error. Propagated to the caller, no local recovery.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A batch upsert failed partway through an indexing run. Remaining
    /// batches are aborted; `points_indexed` counts what made it in.
    #[error("Indexing failed after {points_indexed} points (batch {batch}): {reason}")]
    IndexingFailure {
        batch: usize,
        points_indexed: usize,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Persistence(err.to_string())
    }
}
