//! Answer records, relevance classification, and token accounting.

use serde::{Deserialize, Serialize};

/// Three-way relevance label produced by the self-evaluation call, plus the
/// `Unknown` fallback used when evaluation output cannot be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relevance {
    Relevant,
    PartlyRelevant,
    NonRelevant,
    Unknown,
}

impl Relevance {
    pub fn as_str(self) -> &'static str {
        match self {
            Relevance::Relevant => "RELEVANT",
            Relevance::PartlyRelevant => "PARTLY_RELEVANT",
            Relevance::NonRelevant => "NON_RELEVANT",
            Relevance::Unknown => "UNKNOWN",
        }
    }
}

/// Token usage reported by the language-model provider for a single call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One completed single-turn generation: the text plus its token usage.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// The unit returned to the caller for one answered question.
///
/// Created once per question and immutable afterwards. Persistence is the
/// transport layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Generated answer text.
    pub answer: String,
    /// Model identifier used for both calls.
    pub model_used: String,
    /// Wall-clock seconds for the generation + evaluation sequence.
    pub response_time: f64,
    /// Self-evaluated relevance of the answer to the question.
    pub relevance: Relevance,
    /// Brief explanation attached to the relevance label.
    pub relevance_explanation: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    pub eval_prompt_tokens: u32,
    pub eval_completion_tokens: u32,
    pub eval_total_tokens: u32,
    /// Summed monetary cost of the generation and evaluation calls, USD.
    pub cost_usd: f64,
}
