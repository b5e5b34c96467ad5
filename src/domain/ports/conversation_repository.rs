//! Conversation and feedback persistence port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::AnswerRecord;

/// Store for answered conversations and user feedback on them.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Persist a completed answer under a conversation id.
    async fn save_conversation(
        &self,
        conversation_id: &str,
        question: &str,
        answer: &AnswerRecord,
    ) -> DomainResult<()>;

    /// Persist a +1/-1 feedback value for a conversation.
    async fn save_feedback(&self, conversation_id: &str, value: i32) -> DomainResult<()>;
}
