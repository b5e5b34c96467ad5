//! Grounded answer composition with relevance self-evaluation and cost
//! accounting.

use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AnswerRecord, MenuRecord, Relevance, SearchHit, TokenUsage};
use crate::domain::ports::ChatModel;
use crate::services::pricing;
use crate::services::retrieval::RetrievalEngine;

const PROMPT_TEMPLATE: &str = "\
You're a restaurant connoisseur. Answer the QUESTION based on the CONTEXT from our restaurant and menu items database.
Use only the facts from the CONTEXT when answering the QUESTION.

QUESTION: {question}

CONTEXT:
{context}";

const EVALUATION_PROMPT_TEMPLATE: &str = "\
You are an expert evaluator for a RAG system.
Your task is to analyze the relevance of the generated answer to the given question.
Based on the relevance of the generated answer, you will classify it
as \"NON_RELEVANT\", \"PARTLY_RELEVANT\", or \"RELEVANT\".

Here is the data for evaluation:

Question: {question}
Generated Answer: {answer}

Please analyze the content and context of the generated answer in relation to the question
and provide your evaluation in parsable JSON without using code blocks:

{
\"Relevance\": \"NON_RELEVANT\" | \"PARTLY_RELEVANT\" | \"RELEVANT\",
\"Explanation\": \"[Provide a brief explanation for your evaluation]\"
}";

const PARSE_FAILURE_NOTE: &str = "Failed to parse evaluation";

/// Structured verdict expected from the evaluation call.
#[derive(Debug, Deserialize)]
struct EvaluationVerdict {
    #[serde(rename = "Relevance")]
    relevance: Relevance,
    #[serde(rename = "Explanation")]
    explanation: String,
}

/// Builds a grounded prompt from retrieved records, generates an answer,
/// self-evaluates its relevance, and aggregates token/cost/latency metrics
/// into one [`AnswerRecord`].
pub struct AnswerComposer {
    retrieval: Arc<RetrievalEngine>,
    chat: Arc<dyn ChatModel>,
    top_k: usize,
}

impl AnswerComposer {
    pub fn new(retrieval: Arc<RetrievalEngine>, chat: Arc<dyn ChatModel>, top_k: usize) -> Self {
        Self {
            retrieval,
            chat,
            top_k,
        }
    }

    /// Answer a question from the indexed corpus.
    ///
    /// Generation failure propagates — no partial record is produced.
    /// Evaluation failure (call or parse) degrades the relevance fields to
    /// `UNKNOWN` instead of failing the answer.
    pub async fn answer(&self, question: &str) -> DomainResult<AnswerRecord> {
        let hits = self.retrieval.search(question, self.top_k).await?;
        debug!(hits = hits.len(), "Retrieved context records");

        let prompt = build_prompt(question, &hits)?;

        let started = Instant::now();
        let generation = self.chat.complete(&prompt).await?;
        let (relevance, explanation, eval_usage) =
            self.evaluate_relevance(question, &generation.text).await;
        let response_time = started.elapsed().as_secs_f64();

        let model = self.chat.model_id().to_string();
        let cost_usd = pricing::answer_cost(&model, generation.usage, eval_usage)
            .unwrap_or_else(|| {
                warn!(model = %model, "No pricing for model, reporting zero cost");
                0.0
            });

        Ok(AnswerRecord {
            answer: generation.text,
            model_used: model,
            response_time,
            relevance,
            relevance_explanation: explanation,
            prompt_tokens: generation.usage.prompt_tokens,
            completion_tokens: generation.usage.completion_tokens,
            total_tokens: generation.usage.total_tokens,
            eval_prompt_tokens: eval_usage.prompt_tokens,
            eval_completion_tokens: eval_usage.completion_tokens,
            eval_total_tokens: eval_usage.total_tokens,
            cost_usd,
        })
    }

    /// Ask the model to classify the answer's relevance to the question.
    ///
    /// Never fails: an unreachable provider or unparseable verdict yields
    /// `UNKNOWN` with an explanatory note.
    async fn evaluate_relevance(
        &self,
        question: &str,
        answer: &str,
    ) -> (Relevance, String, TokenUsage) {
        let prompt = EVALUATION_PROMPT_TEMPLATE
            .replace("{question}", question)
            .replace("{answer}", answer);

        let evaluation = match self.chat.complete(&prompt).await {
            Ok(completion) => completion,
            Err(err) => {
                warn!("Relevance evaluation call failed: {err}");
                return (
                    Relevance::Unknown,
                    format!("Evaluation unavailable: {err}"),
                    TokenUsage::default(),
                );
            }
        };

        match serde_json::from_str::<EvaluationVerdict>(evaluation.text.trim()) {
            Ok(verdict) => (verdict.relevance, verdict.explanation, evaluation.usage),
            Err(err) => {
                warn!("Unparseable relevance verdict: {err}");
                (
                    Relevance::Unknown,
                    PARSE_FAILURE_NOTE.to_string(),
                    evaluation.usage,
                )
            }
        }
    }
}

/// Substitute question and grounding context into the instruction template.
fn build_prompt(question: &str, hits: &[SearchHit]) -> DomainResult<String> {
    let context = build_context(hits)?;
    Ok(PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{context}", &context))
}

/// Render retrieved payloads through the fixed field-keyed template, blocks
/// joined by blank lines. A payload missing a required field fails loudly.
fn build_context(hits: &[SearchHit]) -> DomainResult<String> {
    let mut blocks = Vec::with_capacity(hits.len());
    for hit in hits {
        let record: MenuRecord = serde_json::from_value(hit.payload.clone()).map_err(|e| {
            DomainError::Serialization(format!("retrieved payload (point {}): {e}", hit.id))
        })?;
        blocks.push(format_record(&record));
    }
    Ok(blocks.join("\n\n"))
}

fn format_record(record: &MenuRecord) -> String {
    let na_str = MenuRecord::display_or_na::<String>;
    let na_f64 = MenuRecord::display_or_na::<f64>;
    format!(
        "restaurant_name: {}\n\
         score: {}\n\
         ratings_count: {}\n\
         restaurant_category: {}\n\
         price_range: {}\n\
         full_address: {}\n\
         zip_code: {}\n\
         lat: {}\n\
         lng: {}\n\
         restaurant_id: {}\n\
         menu_category: {}\n\
         menu_item_name: {}\n\
         description: {}\n\
         item_price: {}\n\
         city: {}\n\
         state: {}",
        record.restaurant_name,
        na_f64(record.score.as_ref()),
        na_f64(record.ratings.as_ref()),
        record.restaurant_category,
        na_str(record.price_range.as_ref()),
        record.full_address,
        na_str(record.zip_code.as_ref()),
        na_f64(record.lat.as_ref()),
        na_f64(record.lng.as_ref()),
        record.restaurant_id,
        record.menu_category,
        record.item_name,
        na_str(record.description.as_ref()),
        na_str(record.item_price.as_ref()),
        na_str(record.city.as_ref()),
        na_str(record.state.as_ref()),
    )
}
