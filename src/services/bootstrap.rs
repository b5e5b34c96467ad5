//! Explicit construction of the long-lived engines.
//!
//! Model clients and the vector-service connection are expensive to set up
//! and stateless afterwards, so they are built once from configuration and
//! handed to callers (HTTP state, CLI commands) that reuse them for the
//! process lifetime. There is no hidden global cache.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::DomainResult;
use crate::domain::models::Config;
use crate::infrastructure::openai::OpenAiClient;
use crate::infrastructure::qdrant::QdrantStore;
use crate::ingest::{CorpusLoader, EmbeddingAdapter};
use crate::services::composer::AnswerComposer;
use crate::services::indexing::IndexingOptions;
use crate::services::retrieval::RetrievalEngine;

/// The construct-once engine pair behind every entry point.
#[derive(Clone)]
pub struct Engines {
    pub retrieval: Arc<RetrievalEngine>,
    pub composer: Arc<AnswerComposer>,
}

impl Engines {
    /// Wire up the full pipeline from configuration.
    pub fn from_config(config: &Config) -> DomainResult<Self> {
        let retrieval = build_retrieval(config)?;
        let chat = Arc::new(OpenAiClient::new(&config.llm, &config.retry)?);

        let composer = Arc::new(AnswerComposer::new(
            Arc::clone(&retrieval),
            chat,
            config.retrieval.top_k,
        ));

        Ok(Self {
            retrieval,
            composer,
        })
    }
}

/// Build the retrieval side alone — enough for indexing runs, which never
/// touch the language model.
pub fn build_retrieval(config: &Config) -> DomainResult<Arc<RetrievalEngine>> {
    let store = Arc::new(QdrantStore::connect(&config.qdrant)?);

    let corpus = Arc::new(CorpusLoader::new(
        &config.ingest.restaurants_path,
        &config.ingest.menus_path,
        config.ingest.max_menu_rows,
    ));

    Ok(Arc::new(RetrievalEngine::new(
        store,
        EmbeddingAdapter::new(&config.embedding.model),
        corpus,
        &config.retrieval.collection,
        config.retrieval.vector_size,
        IndexingOptions {
            batch_size: config.ingest.batch_size,
            batch_pause: Duration::from_millis(config.ingest.batch_pause_ms),
        },
    )))
}
