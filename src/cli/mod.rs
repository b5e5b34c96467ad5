//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

/// Retrieval-augmented question answering over a restaurant corpus.
#[derive(Parser)]
#[command(name = "savor", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .savor/
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API, bootstrapping the index in the background
    Serve(commands::serve::ServeArgs),

    /// Ask a question once, or interactively when none is given
    Ask(commands::ask::AskArgs),

    /// Rebuild the collection from the tabular sources and wait
    Index(commands::index::IndexArgs),
}

/// Print a top-level error and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": err.to_string() }));
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
