//! Savor CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use savor::cli::{handle_error, Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => savor::cli::commands::serve::execute(args, cli.config, cli.json).await,
        Commands::Ask(args) => savor::cli::commands::ask::execute(args, cli.config, cli.json).await,
        Commands::Index(args) => savor::cli::commands::index::execute(args, cli.config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
