//! Qdrant vector service adapter.

pub mod store;

pub use store::QdrantStore;
