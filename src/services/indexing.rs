//! Batched asynchronous upsert into the vector store.
//!
//! Indexing runs on a background task so collection bootstrap never blocks
//! the first caller; the returned [`IndexingTask`] is the optional join
//! point and the progress feed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::IndexPoint;
use crate::domain::ports::VectorStore;

/// Batch sizing and pacing for one indexing run.
#[derive(Debug, Clone)]
pub struct IndexingOptions {
    /// Points per upsert call.
    pub batch_size: usize,
    /// Pause between batches, keeping the service responsive during large
    /// ingestion runs.
    pub batch_pause: Duration,
}

impl Default for IndexingOptions {
    fn default() -> Self {
        Self {
            batch_size: 500,
            batch_pause: Duration::from_millis(50),
        }
    }
}

/// Progress of an in-flight indexing run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexingProgress {
    pub points_indexed: usize,
    pub total_points: usize,
    pub batches_done: usize,
}

/// Final report of a completed indexing run.
#[derive(Debug, Clone, Copy)]
pub struct IndexingReport {
    pub points_indexed: usize,
    pub batches: usize,
}

/// Handle over a background indexing run. Dropping it detaches the run;
/// `wait` joins it and surfaces the first batch failure.
pub struct IndexingTask {
    handle: JoinHandle<DomainResult<IndexingReport>>,
    progress: watch::Receiver<IndexingProgress>,
}

impl IndexingTask {
    /// Subscribe to per-batch progress updates.
    pub fn progress(&self) -> watch::Receiver<IndexingProgress> {
        self.progress.clone()
    }

    /// Whether the background task has finished (successfully or not).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the run completes and return its outcome.
    pub async fn wait(self) -> DomainResult<IndexingReport> {
        match self.handle.await {
            Ok(result) => result,
            Err(join_err) => Err(DomainError::IndexingFailure {
                batch: 0,
                points_indexed: 0,
                reason: format!("indexing task panicked: {join_err}"),
            }),
        }
    }

    /// Abort the background task. Already-upserted batches stay in the
    /// collection.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Partition `points` into fixed-size batches and upsert them sequentially
/// on a background task.
///
/// A batch failure aborts the remaining batches and surfaces through the
/// returned handle; the caller decides whether to retry. Nothing is retried
/// automatically.
pub fn spawn_upsert(
    store: Arc<dyn VectorStore>,
    collection: String,
    points: Vec<IndexPoint>,
    options: IndexingOptions,
) -> IndexingTask {
    let total_points = points.len();
    let (tx, rx) = watch::channel(IndexingProgress {
        total_points,
        ..IndexingProgress::default()
    });

    let handle = tokio::spawn(async move {
        let batch_count = points.len().div_ceil(options.batch_size).max(1);
        info!(
            collection = %collection,
            points = total_points,
            batches = batch_count,
            "Starting background indexing"
        );

        let mut points_indexed = 0;
        let mut batches_done = 0;

        let mut batches = points.chunks(options.batch_size).peekable();
        while let Some(batch) = batches.next() {
            let batch_len = batch.len();
            if let Err(err) = store.upsert_batch(&collection, batch.to_vec()).await {
                error!(
                    collection = %collection,
                    batch = batches_done,
                    points_indexed,
                    "Batch upsert failed, aborting remaining batches: {err}"
                );
                return Err(DomainError::IndexingFailure {
                    batch: batches_done,
                    points_indexed,
                    reason: err.to_string(),
                });
            }

            points_indexed += batch_len;
            batches_done += 1;
            let _ = tx.send(IndexingProgress {
                points_indexed,
                total_points,
                batches_done,
            });
            info!(
                collection = %collection,
                points_indexed,
                total_points,
                "Indexed batch {batches_done}/{batch_count}"
            );

            if batches.peek().is_some() {
                sleep(options.batch_pause).await;
            }
        }

        info!(collection = %collection, points_indexed, "Finished indexing");
        Ok(IndexingReport {
            points_indexed,
            batches: batches_done,
        })
    });

    IndexingTask {
        handle,
        progress: rx,
    }
}
