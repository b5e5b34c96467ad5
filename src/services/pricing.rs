//! Model-aware cost accounting for LLM calls.
//!
//! Cost is a linear function of prompt and completion token counts with
//! distinct per-model rates.

use crate::domain::models::TokenUsage;

/// Pricing per million tokens for a specific model.
#[derive(Debug, Clone, Copy)]
pub struct ModelRates {
    /// Cost per million prompt tokens (USD).
    pub prompt: f64,
    /// Cost per million completion tokens (USD).
    pub completion: f64,
}

/// Known model pricing table (USD per million tokens). More specific names
/// must precede their prefixes for substring matching.
const RATE_TABLE: &[(&str, ModelRates)] = &[
    ("gpt-5-nano", ModelRates { prompt: 0.05, completion: 0.40 }),
    ("gpt-5-mini", ModelRates { prompt: 0.25, completion: 2.00 }),
    ("gpt-5", ModelRates { prompt: 1.25, completion: 10.00 }),
    ("gpt-4o-mini", ModelRates { prompt: 0.15, completion: 0.60 }),
    ("gpt-4o", ModelRates { prompt: 2.50, completion: 10.00 }),
];

/// Get rates for a model by name or versioned alias (e.g. "gpt-5-nano"
/// matches "gpt-5-nano-2025-08-07").
pub fn model_rates(model: &str) -> Option<ModelRates> {
    let model_lower = model.to_lowercase();
    RATE_TABLE
        .iter()
        .find(|(name, _)| model_lower.contains(name))
        .map(|(_, rates)| *rates)
}

/// Estimate the cost of one call in USD.
pub fn estimate_cost(model: &str, usage: TokenUsage) -> Option<f64> {
    let rates = model_rates(model)?;
    Some(
        (f64::from(usage.prompt_tokens) * rates.prompt
            + f64::from(usage.completion_tokens) * rates.completion)
            / 1_000_000.0,
    )
}

/// Summed cost of the generation and evaluation calls of one answer.
pub fn answer_cost(model: &str, generation: TokenUsage, evaluation: TokenUsage) -> Option<f64> {
    Some(estimate_cost(model, generation)? + estimate_cost(model, evaluation)?)
}
