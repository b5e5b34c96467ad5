//! Retrieval engine: collection lifecycle, indexing orchestration, and
//! top-k similarity search.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{IndexPoint, MenuRecord, SearchHit};
use crate::domain::ports::VectorStore;
use crate::ingest::{CorpusLoader, EmbeddingAdapter};
use crate::services::indexing::{spawn_upsert, IndexingOptions, IndexingTask};

/// Composes the corpus loader, embedding adapter, and vector store behind
/// one `search` operation plus the one-time collection setup around it.
pub struct RetrievalEngine {
    store: Arc<dyn VectorStore>,
    embedder: EmbeddingAdapter,
    corpus: Arc<CorpusLoader>,
    default_collection: String,
    vector_size: u64,
    indexing: IndexingOptions,
}

impl RetrievalEngine {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: EmbeddingAdapter,
        corpus: Arc<CorpusLoader>,
        default_collection: impl Into<String>,
        vector_size: u64,
        indexing: IndexingOptions,
    ) -> Self {
        Self {
            store,
            embedder,
            corpus,
            default_collection: default_collection.into(),
            vector_size,
            indexing,
        }
    }

    /// Name of the collection used when none is given.
    pub fn default_collection(&self) -> &str {
        &self.default_collection
    }

    /// Create (replacing if present) the collection that backs this engine.
    pub async fn initialize_collection(&self, collection: Option<&str>) -> DomainResult<()> {
        let name = collection.unwrap_or(&self.default_collection);
        self.store.create_collection(name, self.vector_size).await
    }

    /// Embed the corpus and start a background indexing run.
    ///
    /// When `data` is not supplied the corpus is loaded from the tabular
    /// sources. Point ids are positional (0..n-1): re-indexing a reordered
    /// or resized corpus reassigns them, so full replacement is the only
    /// supported refresh pattern — not incremental merge.
    pub async fn index_data(
        &self,
        collection: Option<&str>,
        data: Option<Vec<MenuRecord>>,
    ) -> DomainResult<IndexingTask> {
        let name = collection.unwrap_or(&self.default_collection).to_string();

        let records = match data {
            Some(records) => records,
            None => {
                let corpus = Arc::clone(&self.corpus);
                tokio::task::spawn_blocking(move || corpus.load_and_merge())
                    .await
                    .map_err(|e| DomainError::InvalidSource(format!("corpus load: {e}")))??
            }
        };

        let points = self.build_points(&records)?;
        info!(
            collection = %name,
            points = points.len(),
            "Dispatching corpus to background indexing"
        );

        Ok(spawn_upsert(
            Arc::clone(&self.store),
            name,
            points,
            self.indexing.clone(),
        ))
    }

    /// Embed the raw query text and search the default collection.
    pub async fn search(&self, query: &str, k: usize) -> DomainResult<Vec<SearchHit>> {
        let embedding = self.embedder.embed(query);
        self.store
            .query(&self.default_collection, embedding, k)
            .await
    }

    /// Bootstrap policy: if the collection exists, leave it alone; if not,
    /// create it and kick off indexing without blocking the caller.
    ///
    /// Queries issued while the returned task is still running may see a
    /// partially populated collection — callers needing completeness must
    /// wait on the task.
    pub async fn ensure_indexed(&self) -> DomainResult<Option<IndexingTask>> {
        if self.store.collection_exists(&self.default_collection).await? {
            info!(
                collection = %self.default_collection,
                "Collection already exists, skipping indexing"
            );
            return Ok(None);
        }

        warn!(
            collection = %self.default_collection,
            "Collection missing, creating and indexing in the background"
        );
        self.initialize_collection(None).await?;
        let task = self.index_data(None, None).await?;
        Ok(Some(task))
    }

    fn build_points(&self, records: &[MenuRecord]) -> DomainResult<Vec<IndexPoint>> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let text = CorpusLoader::format_embedding_text(record);
                Ok(IndexPoint {
                    id: idx as u64,
                    embedding: self.embedder.embed(&text),
                    payload: serde_json::to_value(record)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::EmbeddingRequest;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SpyStore {
        exists: bool,
        created: Mutex<Vec<(String, u64)>>,
        upserted: Mutex<Vec<IndexPoint>>,
        queries: Mutex<Vec<(String, EmbeddingRequest, usize)>>,
        hits: Vec<SearchHit>,
    }

    #[async_trait]
    impl VectorStore for SpyStore {
        async fn collection_exists(&self, _name: &str) -> DomainResult<bool> {
            Ok(self.exists)
        }

        async fn create_collection(&self, name: &str, vector_size: u64) -> DomainResult<()> {
            self.created
                .lock()
                .unwrap()
                .push((name.to_string(), vector_size));
            Ok(())
        }

        async fn upsert_batch(&self, _name: &str, points: Vec<IndexPoint>) -> DomainResult<()> {
            self.upserted.lock().unwrap().extend(points);
            Ok(())
        }

        async fn query(
            &self,
            name: &str,
            query: EmbeddingRequest,
            limit: usize,
        ) -> DomainResult<Vec<SearchHit>> {
            self.queries
                .lock()
                .unwrap()
                .push((name.to_string(), query, limit));
            Ok(self.hits.iter().take(limit).cloned().collect())
        }
    }

    fn record(id: i64, name: &str, item: &str) -> MenuRecord {
        MenuRecord {
            restaurant_id: id,
            restaurant_name: name.to_string(),
            score: None,
            ratings: None,
            restaurant_category: "Food".to_string(),
            price_range: None,
            full_address: "1 Main St, Springfield, IL".to_string(),
            zip_code: None,
            lat: None,
            lng: None,
            menu_category: "Mains".to_string(),
            item_name: item.to_string(),
            description: None,
            item_price: None,
            city: Some("Springfield".to_string()),
            state: Some("IL".to_string()),
        }
    }

    fn engine(store: Arc<SpyStore>) -> RetrievalEngine {
        RetrievalEngine::new(
            store,
            EmbeddingAdapter::new("test-model"),
            Arc::new(CorpusLoader::new("/nonexistent/a.csv", "/nonexistent/b.csv", 10)),
            "restaurants",
            512,
            IndexingOptions {
                batch_size: 500,
                batch_pause: std::time::Duration::from_millis(1),
            },
        )
    }

    #[tokio::test]
    async fn indexing_assigns_sequential_ids() {
        let store = Arc::new(SpyStore::default());
        let engine = engine(store.clone());

        let data = vec![
            record(1, "Restaurant A", "Burger"),
            record(2, "Restaurant B", "Salad"),
            record(3, "Restaurant C", "Taco"),
        ];
        let task = engine.index_data(None, Some(data)).await.unwrap();
        task.wait().await.unwrap();

        let upserted = store.upserted.lock().unwrap();
        let ids: Vec<u64> = upserted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(upserted[0].embedding.text.starts_with("Restaurant A"));
        assert_eq!(
            upserted[1].payload.get("item_name").unwrap(),
            &serde_json::json!("Salad")
        );
    }

    #[tokio::test]
    async fn search_embeds_normalized_query() {
        let store = Arc::new(SpyStore::default());
        let engine = engine(store.clone());

        engine.search("  best   burger ", 5).await.unwrap();

        let queries = store.queries.lock().unwrap();
        let (collection, embedding, limit) = &queries[0];
        assert_eq!(collection, "restaurants");
        assert_eq!(embedding.text, "best burger");
        assert_eq!(embedding.model, "test-model");
        assert_eq!(*limit, 5);
    }

    #[tokio::test]
    async fn ensure_indexed_skips_existing_collection() {
        let store = Arc::new(SpyStore {
            exists: true,
            ..SpyStore::default()
        });
        let engine = engine(store.clone());

        let task = engine.ensure_indexed().await.unwrap();
        assert!(task.is_none());
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn initialize_collection_uses_default_name_and_size() {
        let store = Arc::new(SpyStore::default());
        let engine = engine(store.clone());

        engine.initialize_collection(None).await.unwrap();
        assert_eq!(
            store.created.lock().unwrap()[0],
            ("restaurants".to_string(), 512)
        );

        engine.initialize_collection(Some("staging")).await.unwrap();
        assert_eq!(
            store.created.lock().unwrap()[1],
            ("staging".to_string(), 512)
        );
    }
}
