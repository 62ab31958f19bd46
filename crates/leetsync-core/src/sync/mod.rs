//! Repository synchronization.
//!
//! Turns scraped submissions into files, record entries, and one commit per
//! submission. The commit message is the idempotence key: a submission whose
//! message is already in history is skipped before anything is written.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::config::PushConfig;
use crate::git::{self, CommitHistory};
use crate::models::SolvedProblem;
use crate::store::{self, RecordStore, INDEX_FILE, RECORDS_FILE};
use crate::{Error, Result};

pub const PROBLEMS_DIR: &str = "problems";
const DESCRIPTION_FILE: &str = "README.md";

/// Counters for one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub scraped: usize,
    pub committed: usize,
    pub skipped: usize,
    pub records_added: usize,
}

/// What happened to a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    AlreadySynced,
    Committed { record_added: bool },
}

pub struct RepositorySync<'repo> {
    repo: &'repo Repository,
    root: PathBuf,
    store: RecordStore,
    push: PushConfig,
}

impl<'repo> RepositorySync<'repo> {
    pub fn new(repo: &'repo Repository, push: PushConfig) -> Result<Self> {
        let root = repo
            .workdir()
            .ok_or_else(|| Error::InvalidInput("repository has no working tree".to_string()))?
            .to_path_buf();
        let store = RecordStore::in_repo(&root);

        Ok(Self {
            repo,
            root,
            store,
            push,
        })
    }

    /// Sync `problems` in order, stopping at the first error.
    ///
    /// A run that commits nothing still pushes, so commits left local by a
    /// `--no-push` run or a failed push reach the remote.
    pub fn sync_all(
        &self,
        problems: &[SolvedProblem],
        history: &mut CommitHistory,
    ) -> Result<SyncReport> {
        let mut report = SyncReport {
            scraped: problems.len(),
            ..SyncReport::default()
        };

        for problem in problems {
            match self.sync_one(problem, history)? {
                SyncOutcome::AlreadySynced => report.skipped += 1,
                SyncOutcome::Committed { record_added } => {
                    report.committed += 1;
                    if record_added {
                        report.records_added += 1;
                    }
                }
            }
        }

        if report.committed == 0 {
            self.push()?;
        }

        Ok(report)
    }

    pub fn sync_one(
        &self,
        problem: &SolvedProblem,
        history: &mut CommitHistory,
    ) -> Result<SyncOutcome> {
        let message = problem.commit_message();
        if history.contains(&message) {
            tracing::debug!("Already synced: {message}");
            return Ok(SyncOutcome::AlreadySynced);
        }

        let relative_dir = Path::new(PROBLEMS_DIR).join(problem.directory_name());
        let dir = self.root.join(&relative_dir);
        std::fs::create_dir_all(&dir)?;

        write_solution(&dir, problem)?;
        write_description(&dir, problem)?;
        let record_added = self.update_records(problem)?;

        git::commit_paths(
            self.repo,
            &[
                relative_dir,
                PathBuf::from(INDEX_FILE),
                PathBuf::from(RECORDS_FILE),
            ],
            &message,
            problem.submitted_at(),
        )?;
        history.insert(&message, problem.timestamp);
        self.push()?;

        Ok(SyncOutcome::Committed { record_added })
    }

    /// Push HEAD when a remote is configured. An unborn HEAD has nothing to push.
    fn push(&self) -> Result<()> {
        let PushConfig::Remote { remote, token } = &self.push else {
            return Ok(());
        };
        if self.repo.is_empty()? {
            return Ok(());
        }

        git::push_head(self.repo, remote, token.as_deref())
    }

    /// Append the submission's record entry, regenerating the index first
    /// so a crash never leaves a stored entry with a stale index.
    fn update_records(&self, problem: &SolvedProblem) -> Result<bool> {
        let Some(entries) = self.store.merge(problem.to_record())? else {
            return Ok(false);
        };

        store::write_index(&self.root, &entries)?;
        self.store.save(&entries)?;
        tracing::info!("Recorded {:04} {}", problem.id, problem.title);
        Ok(true)
    }
}

/// A solution file left behind by an interrupted run is kept as is.
fn write_solution(dir: &Path, problem: &SolvedProblem) -> Result<()> {
    let path = dir.join(problem.solution_file_name());
    if path.exists() {
        tracing::warn!("Keeping existing {}", path.display());
        return Ok(());
    }

    std::fs::write(&path, problem.code.trim())?;
    Ok(())
}

/// The per-problem description is written once and never refreshed.
fn write_description(dir: &Path, problem: &SolvedProblem) -> Result<()> {
    let path = dir.join(DESCRIPTION_FILE);
    if path.exists() {
        return Ok(());
    }

    std::fs::write(
        &path,
        format!(
            "<h2>{}. {}</h2>\n\n{}",
            problem.id,
            problem.title,
            problem.content.trim()
        ),
    )?;
    Ok(())
}
