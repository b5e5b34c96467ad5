//! Services layer: the answer pipeline orchestrated over domain ports.

pub mod bootstrap;
pub mod composer;
pub mod indexing;
pub mod pricing;
pub mod retrieval;

pub use bootstrap::Engines;
pub use composer::AnswerComposer;
pub use indexing::{spawn_upsert, IndexingOptions, IndexingProgress, IndexingReport, IndexingTask};
pub use retrieval::RetrievalEngine;
