//! Ports consumed by the services layer, implemented by infrastructure.

pub mod chat_model;
pub mod conversation_repository;
pub mod vector_store;

pub use chat_model::ChatModel;
pub use conversation_repository::ConversationRepository;
pub use vector_store::VectorStore;
