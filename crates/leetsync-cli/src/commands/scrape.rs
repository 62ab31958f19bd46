use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use leetsync_core::config::JudgeConfig;
use leetsync_core::pipeline;

use crate::error::CliError;

/// Scrape without touching any repository and dump the result as JSON.
pub async fn run_scrape(
    output_path: Option<&Path>,
    request_delay_ms: Option<u64>,
) -> Result<(), CliError> {
    let mut judge = JudgeConfig::from_env()?;
    if let Some(delay_ms) = request_delay_ms {
        judge = judge.with_request_delay(Duration::from_millis(delay_ms));
    }

    let problems = pipeline::scrape(&judge).await?;
    let rendered = serde_json::to_string_pretty(&problems)?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        writeln!(io::stdout(), "{rendered}")?;
    }

    tracing::info!("Scraped {} solved problems", problems.len());
    Ok(())
}
