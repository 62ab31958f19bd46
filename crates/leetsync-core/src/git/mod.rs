//! git plumbing for the archive repository.
//!
//! Commit dates and credentials are passed explicitly to libgit2; nothing
//! here touches process environment variables or rewrites the configured
//! remote URL.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use git2::{
    Commit, Cred, ErrorCode, IndexAddOption, Oid, PushOptions, RemoteCallbacks, Repository,
    Signature, Time,
};
use url::Url;

use crate::config::is_http_url;
use crate::{Error, Result};

/// Messages of every commit reachable from HEAD, mapped to commit time.
#[derive(Debug, Clone, Default)]
pub struct CommitHistory {
    messages: HashMap<String, i64>,
}

impl CommitHistory {
    /// Walk the full history from HEAD. An unborn HEAD yields an empty index.
    pub fn load(repo: &Repository) -> Result<Self> {
        let mut history = Self::default();
        if head_commit(repo)?.is_none() {
            return Ok(history);
        }

        let mut walk = repo.revwalk()?;
        walk.push_head()?;
        for oid in walk {
            let commit = repo.find_commit(oid?)?;
            let message = commit.message().unwrap_or_default();
            history
                .messages
                .entry(normalize_message(message).to_string())
                .or_insert_with(|| commit.time().seconds());
        }

        tracing::debug!("Indexed {} commit messages", history.messages.len());
        Ok(history)
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.contains_key(normalize_message(message))
    }

    pub fn insert(&mut self, message: &str, timestamp: i64) {
        self.messages
            .entry(normalize_message(message).to_string())
            .or_insert(timestamp);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// git appends a newline to messages written by the CLI; compare without it.
fn normalize_message(message: &str) -> &str {
    message.trim_end()
}

fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(error) if matches!(error.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

/// Stage `paths` (relative to the working tree) and commit them onto HEAD.
///
/// Author and committer are both dated `when`. Directories are staged
/// recursively, including files matched by `.gitignore`; paths that do not
/// exist are ignored.
pub fn commit_paths(
    repo: &Repository,
    paths: &[PathBuf],
    message: &str,
    when: DateTime<Local>,
) -> Result<Oid> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| Error::InvalidInput("repository has no working tree".to_string()))?
        .to_path_buf();

    let mut index = repo.index()?;
    for path in paths {
        let absolute = workdir.join(path);
        if absolute.is_dir() {
            index.add_all([path.as_path()], IndexAddOption::FORCE, None)?;
        } else if absolute.is_file() {
            index.add_path(path)?;
        }
    }
    index.write()?;

    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = signature_at(repo, when)?;
    let parent = head_commit(repo)?;
    let parents = parent.iter().collect::<Vec<_>>();

    let oid = repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?;
    tracing::info!(date = %when.to_rfc2822(), "Committed {message}");
    Ok(oid)
}

/// Signature dated `when` in its own UTC offset.
///
/// The identity is taken from the author of the current HEAD commit so that
/// archive commits match the repository owner, falling back to `user.name`
/// and `user.email` from git config.
fn signature_at(repo: &Repository, when: DateTime<Local>) -> Result<Signature<'static>> {
    let time = Time::new(when.timestamp(), when.offset().local_minus_utc() / 60);

    if let Some(commit) = head_commit(repo)? {
        let author = commit.author();
        if let (Some(name), Some(email)) = (author.name(), author.email()) {
            return Ok(Signature::new(name, email, &time)?);
        }
    }

    let configured = repo.signature().map_err(|_| {
        Error::Config(
            "no commit identity: set git user.name and user.email, or make an initial commit"
                .to_string(),
        )
    })?;
    let name = configured.name().unwrap_or_default().to_string();
    let email = configured.email().unwrap_or_default().to_string();
    Ok(Signature::new(&name, &email, &time)?)
}

/// Push URL for `origin` with `token` injected before the host.
///
/// Only http(s) URLs are rewritten; the result always ends in `.git`.
/// ssh and local remotes, or a missing token, return `origin` unchanged.
pub fn authenticated_push_url(origin: &str, token: Option<&str>) -> Result<String> {
    let Some(token) = token else {
        return Ok(origin.to_string());
    };
    if !is_http_url(origin) {
        return Ok(origin.to_string());
    }

    let mut url = Url::parse(origin)
        .map_err(|error| Error::Config(format!("invalid remote URL: {error}")))?;
    url.set_username(token)
        .and_then(|()| url.set_password(None))
        .map_err(|()| Error::Config("remote URL cannot carry credentials".to_string()))?;

    if !url.path().ends_with(".git") {
        let path = format!("{}.git", url.path().trim_end_matches('/'));
        url.set_path(&path);
    }

    Ok(url.to_string())
}

/// Push the current branch to `remote_name`.
///
/// The configured remote URL is read but never rewritten; the push goes
/// through an anonymous remote so the token is not persisted to disk.
pub fn push_head(repo: &Repository, remote_name: &str, token: Option<&str>) -> Result<()> {
    let push_url = {
        let remote = repo.find_remote(remote_name)?;
        let url = remote
            .url()
            .ok_or_else(|| Error::Config(format!("remote '{remote_name}' has no URL")))?;
        authenticated_push_url(url, token)?
    };

    let head = repo.head()?;
    if !head.is_branch() {
        return Err(Error::InvalidInput(
            "HEAD is detached; check out a branch before syncing".to_string(),
        ));
    }
    let branch_ref = head
        .name()
        .ok_or_else(|| Error::InvalidInput("branch name is not valid UTF-8".to_string()))?;
    let refspec = format!("{branch_ref}:{branch_ref}");

    let mut callbacks = RemoteCallbacks::new();
    if let Some(token) = token {
        let token = token.to_string();
        callbacks.credentials(move |_url, _username, _allowed| {
            Cred::userpass_plaintext("x-access-token", &token)
        });
    }
    callbacks.push_update_reference(|refname, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "push of {refname} rejected: {message}"
        ))),
        None => Ok(()),
    });

    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    let mut remote = repo.remote_anonymous(&push_url)?;
    remote.push(&[refspec.as_str()], Some(&mut options))?;
    tracing::info!("Pushed {branch_ref} to {remote_name}");
    Ok(())
}
