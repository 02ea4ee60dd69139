use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bq::{
    cli::{self, CliError},
    config::Config,
};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()
        .context("failed to load config.yaml")
        .map_err(|e| CliError::configuration(format!("{e:#}")))?;

    cli::run(args.command, config)?;

    Ok(())
}
