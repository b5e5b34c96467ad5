/// Request and response types for the chat-completions API.
use serde::{Deserialize, Serialize};

use crate::domain::models::TokenUsage;

/// Chat-completion request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g. "gpt-5-nano")
    pub model: String,

    /// Conversation messages; this client always sends a single user turn
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Build a single-turn user request.
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
        }
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completion response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: UsageStats,
}

/// One completion choice; only the first is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Token usage statistics as reported by the provider.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UsageStats {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl From<UsageStats> for TokenUsage {
    fn from(usage: UsageStats) -> Self {
        TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_turn_request_serializes() {
        let request = ChatCompletionRequest::single_turn("gpt-5-nano", "Hello");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("gpt-5-nano"));
        assert!(json.contains(r#""role":"user""#));
        assert!(json.contains("Hello"));
    }

    #[test]
    fn response_deserializes() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Hi"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices[0].message.content, "Hi");
        assert_eq!(response.usage.total_tokens, 12);
    }
}
