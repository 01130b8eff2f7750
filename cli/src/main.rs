use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

mod commands;
mod output;

use commands::{Cli, Commands};

const FALLBACK_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let from_env = EnvFilter::try_from_default_env().ok();
    let explicit_filter = from_env.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(FALLBACK_LOG_LEVEL)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = commands::load_settings(&cli.global)?;

    // RUST_LOG wins over the configured level
    if !explicit_filter {
        filter_handle.reload(EnvFilter::new(&settings.observability.log_level))?;
    }

    match cli.command {
        Commands::Chain(args) => commands::chain::run(args, &settings, cli.global.json),
        Commands::Get(args) => commands::get::run(args, &settings, cli.global.json).await,
        Commands::EnsureIndex => commands::ensure_index::run(&settings, cli.global.json).await
    }
}
