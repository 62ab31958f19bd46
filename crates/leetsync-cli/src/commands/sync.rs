use std::path::Path;
use std::time::Duration;

use leetsync_core::config::SyncConfig;
use leetsync_core::pipeline;
use leetsync_core::sync::SyncReport;

use crate::error::CliError;

pub async fn run_sync(
    repo: &Path,
    push: bool,
    request_delay_ms: Option<u64>,
) -> Result<(), CliError> {
    let mut config = SyncConfig::from_env(repo, push)?;
    if let Some(delay_ms) = request_delay_ms {
        config.judge = config.judge.with_request_delay(Duration::from_millis(delay_ms));
    }

    let report = pipeline::run(&config).await?;
    println!("{}", format_report(&report));
    Ok(())
}

pub fn format_report(report: &SyncReport) -> String {
    if report.committed == 0 {
        return format!("Already up to date ({} solved problems)", report.scraped);
    }

    format!(
        "Committed {} new submissions ({} already synced, {} new problems)",
        report.committed, report.skipped, report.records_added
    )
}
