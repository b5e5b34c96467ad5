//! Shared test doubles for the answer pipeline.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use savor::domain::errors::{DomainError, DomainResult};
use savor::ingest::{CorpusLoader, EmbeddingAdapter};
use savor::services::{AnswerComposer, IndexingOptions, RetrievalEngine};
use savor::{ChatModel, Completion, EmbeddingRequest, IndexPoint, SearchHit, TokenUsage, VectorStore};

/// In-memory vector store with keyword "similarity": a stored point scores
/// 1.0 when its embedded text contains the query text, else 0.0.
#[derive(Default)]
pub struct KeywordStore {
    pub exists: bool,
    pub points: Mutex<Vec<IndexPoint>>,
}

#[async_trait]
impl VectorStore for KeywordStore {
    async fn collection_exists(&self, _name: &str) -> DomainResult<bool> {
        Ok(self.exists)
    }

    async fn create_collection(&self, _name: &str, _vector_size: u64) -> DomainResult<()> {
        self.points.lock().unwrap().clear();
        Ok(())
    }

    async fn upsert_batch(&self, _name: &str, points: Vec<IndexPoint>) -> DomainResult<()> {
        self.points.lock().unwrap().extend(points);
        Ok(())
    }

    async fn query(
        &self,
        _name: &str,
        query: EmbeddingRequest,
        limit: usize,
    ) -> DomainResult<Vec<SearchHit>> {
        let needle = query.text.to_lowercase();
        let mut hits: Vec<SearchHit> = self
            .points
            .lock()
            .unwrap()
            .iter()
            .map(|point| SearchHit {
                id: point.id,
                score: if point.embedding.text.to_lowercase().contains(&needle) {
                    1.0
                } else {
                    0.0
                },
                payload: point.payload.clone(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(limit);
        Ok(hits)
    }
}

/// Vector store that always returns the same canned hits (truncated to the
/// requested limit).
#[derive(Default)]
pub struct CannedStore {
    pub hits: Vec<SearchHit>,
}

#[async_trait]
impl VectorStore for CannedStore {
    async fn collection_exists(&self, _name: &str) -> DomainResult<bool> {
        Ok(true)
    }

    async fn create_collection(&self, _name: &str, _vector_size: u64) -> DomainResult<()> {
        Ok(())
    }

    async fn upsert_batch(&self, _name: &str, _points: Vec<IndexPoint>) -> DomainResult<()> {
        Ok(())
    }

    async fn query(
        &self,
        _name: &str,
        _query: EmbeddingRequest,
        limit: usize,
    ) -> DomainResult<Vec<SearchHit>> {
        Ok(self.hits.iter().take(limit).cloned().collect())
    }
}

/// Chat model replaying a scripted sequence of outcomes.
pub struct ScriptedChat {
    responses: Mutex<VecDeque<DomainResult<Completion>>>,
}

impl ScriptedChat {
    pub fn new(responses: Vec<DomainResult<Completion>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    fn model_id(&self) -> &str {
        "gpt-5-nano"
    }

    async fn complete(&self, _prompt: &str) -> DomainResult<Completion> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(DomainError::ServiceUnavailable(
                    "scripted chat exhausted".to_string(),
                ))
            })
    }
}

pub fn usage(prompt: u32, completion: u32) -> TokenUsage {
    TokenUsage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: prompt + completion,
    }
}

pub fn completion(text: &str, prompt: u32, completion_tokens: u32) -> Completion {
    Completion {
        text: text.to_string(),
        usage: usage(prompt, completion_tokens),
    }
}

/// Full payload for one restaurant–menu pair, as stored in the index.
pub fn sample_payload(id: i64, restaurant: &str, item: &str) -> serde_json::Value {
    serde_json::json!({
        "restaurant_id": id,
        "restaurant_name": restaurant,
        "score": 4.5,
        "ratings": 120.0,
        "restaurant_category": "American",
        "price_range": "$$",
        "full_address": "1 Main St, Springfield, IL",
        "zip_code": "62704",
        "lat": 39.78,
        "lng": -89.65,
        "menu_category": "Mains",
        "item_name": item,
        "description": "House specialty",
        "item_price": "9.99 USD",
        "city": "Springfield",
        "state": "IL"
    })
}

/// Retrieval engine over an arbitrary store, with corpus paths that are
/// never read.
pub fn engine_over(store: Arc<dyn VectorStore>) -> Arc<RetrievalEngine> {
    Arc::new(RetrievalEngine::new(
        store,
        EmbeddingAdapter::new("test-embedding-model"),
        Arc::new(CorpusLoader::new(
            "/nonexistent/restaurants.csv",
            "/nonexistent/menus.csv",
            100,
        )),
        "restaurants",
        512,
        IndexingOptions {
            batch_size: 500,
            batch_pause: Duration::from_millis(1),
        },
    ))
}

/// Composer over canned hits and a scripted chat.
pub fn composer_over(
    store: Arc<dyn VectorStore>,
    chat: ScriptedChat,
    top_k: usize,
) -> AnswerComposer {
    AnswerComposer::new(engine_over(store), Arc::new(chat), top_k)
}
