//! Corpus ingestion: tabular loading/merging and embedding preparation.

pub mod corpus;
pub mod embedding;

pub use corpus::CorpusLoader;
pub use embedding::EmbeddingAdapter;
