//! SQLite persistence adapter.

pub mod connection;
pub mod conversation_repository;

pub use connection::create_pool;
pub use conversation_repository::SqliteConversationRepository;
