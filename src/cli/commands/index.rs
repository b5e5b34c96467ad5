//! `savor index` — rebuild the collection from the tabular sources.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::create_progress_bar;
use crate::services::bootstrap::build_retrieval;

#[derive(Args)]
pub struct IndexArgs {
    /// Target collection (defaults to the configured one)
    #[arg(long)]
    pub collection: Option<String>,
}

pub async fn execute(args: IndexArgs, config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let engine = build_retrieval(&config).context("Failed to construct retrieval engine")?;

    let collection = args.collection.as_deref();
    engine
        .initialize_collection(collection)
        .await
        .context("Failed to create collection")?;

    let task = engine
        .index_data(collection, None)
        .await
        .context("Failed to start indexing")?;

    let mut progress = task.progress();
    let total = progress.borrow().total_points as u64;

    if json {
        let report = task.wait().await?;
        println!(
            "{}",
            serde_json::json!({
                "points_indexed": report.points_indexed,
                "batches": report.batches,
            })
        );
        return Ok(());
    }

    let bar = create_progress_bar(total);
    bar.set_message("indexing");
    while progress.changed().await.is_ok() {
        bar.set_position(progress.borrow().points_indexed as u64);
    }

    let report = task.wait().await.context("Indexing failed")?;
    bar.finish_with_message(format!(
        "indexed {} points in {} batches",
        report.points_indexed, report.batches
    ));

    Ok(())
}
