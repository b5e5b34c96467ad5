//! `savor serve` — run the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use crate::infrastructure::http::{serve, ApiState};
use crate::infrastructure::sqlite::{create_pool, SqliteConversationRepository};
use crate::services::Engines;

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address override
    #[arg(long)]
    pub host: Option<String>,

    /// Port override
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, config_path: Option<PathBuf>, _json: bool) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let engines = Engines::from_config(&config).context("Failed to construct engines")?;

    let pool = create_pool(&config.database)
        .await
        .context("Failed to open conversation store")?;
    let conversations = SqliteConversationRepository::new(pool);
    conversations
        .init_schema()
        .await
        .context("Failed to initialize conversation store schema")?;

    // Bootstrap indexing without blocking startup. The very first questions
    // may race an incomplete index; that trade-off keeps cold starts fast.
    if let Err(err) = engines.retrieval.ensure_indexed().await {
        warn!("Index bootstrap failed, serving anyway: {err}");
    }

    let state = ApiState {
        composer: Arc::clone(&engines.composer),
        conversations: Arc::new(conversations),
    };

    serve(&host, port, state).await
}
