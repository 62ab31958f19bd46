//! End-to-end sync run: scrape the judge, then archive into git.

use git2::Repository;

use crate::config::{JudgeConfig, SyncConfig};
use crate::git::CommitHistory;
use crate::judge::LeetCodeClient;
use crate::models::SolvedProblem;
use crate::sync::{RepositorySync, SyncReport};
use crate::Result;

/// Fetch every solved problem's latest accepted submission, oldest first.
pub async fn scrape(judge: &JudgeConfig) -> Result<Vec<SolvedProblem>> {
    let client = LeetCodeClient::new(judge.clone())?;
    Ok(client.list_solved().await?)
}

/// Run a full sync against the repository at `config.repo_path`.
///
/// The repository and its history are opened before any request is made,
/// so a bad path fails fast. Any scrape failure aborts the run before the
/// repository is touched.
pub async fn run(config: &SyncConfig) -> Result<SyncReport> {
    let repo = Repository::open(&config.repo_path)?;
    let mut history = CommitHistory::load(&repo)?;
    tracing::info!(
        repo = %config.repo_path.display(),
        commits = history.len(),
        "Loaded commit history"
    );

    let problems = scrape(&config.judge).await?;
    tracing::info!("Scraped {} solved problems", problems.len());

    let report = RepositorySync::new(&repo, config.push.clone())?.sync_all(&problems, &mut history)?;
    tracing::info!(
        committed = report.committed,
        skipped = report.skipped,
        records_added = report.records_added,
        "Sync finished"
    );
    Ok(report)
}
