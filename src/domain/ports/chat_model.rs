//! Language-model provider port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Completion;

/// Single-turn chat-style completion: one prompt in, completion text plus
/// token counts out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Identifier of the model answering requests, for cost attribution.
    fn model_id(&self) -> &str;

    /// Submit a single-turn request and wait for the completion.
    async fn complete(&self, prompt: &str) -> DomainResult<Completion>;
}
