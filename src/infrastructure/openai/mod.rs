//! OpenAI-compatible chat-completions adapter.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::OpenAiClient;
pub use error::OpenAiApiError;
pub use retry::RetryPolicy;
