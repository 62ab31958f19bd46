//! leetsync CLI - Archive accepted LeetCode solutions into git
//!
//! Scrapes every solved problem and commits each accepted submission,
//! dated at its submission time, into a local repository.

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::filter::Directive;

use crate::cli::{Cli, Commands};
use crate::commands::completions::run_completions;
use crate::commands::index::run_index;
use crate::commands::scrape::run_scrape;
use crate::commands::sync::run_sync;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = "leetsync=info"
        .parse::<Directive>()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            no_push,
            request_delay_ms,
        } => run_sync(&cli.repo, !no_push, request_delay_ms).await?,
        Commands::Scrape {
            output,
            request_delay_ms,
        } => run_scrape(output.as_deref(), request_delay_ms).await?,
        Commands::Index => run_index(&cli.repo)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
