//! Runtime configuration for the judge client and repository sync.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file by the binary) and are validated once, up front, so the sync itself
//! never fails on a missing credential halfway through.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

pub const SESSION_ENV: &str = "LEETCODE_SESSION";
pub const CSRF_TOKEN_ENV: &str = "LEETCODE_CSRF_TOKEN";
pub const BASE_URL_ENV: &str = "LEETCODE_BASE_URL";
pub const PUSH_TOKEN_ENV: &str = "GITHUB_TOKEN";

pub const DEFAULT_BASE_URL: &str = "https://leetcode.com";
pub const DEFAULT_REMOTE: &str = "origin";
/// Pause before each problem's detail requests. A courtesy to the judge, not
/// a documented limit.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the LeetCode API.
#[derive(Clone, PartialEq, Eq)]
pub struct JudgeConfig {
    pub base_url: String,
    pub session: String,
    pub csrf_token: String,
    pub request_delay: Duration,
    pub request_timeout: Duration,
}

impl JudgeConfig {
    pub fn new(
        base_url: impl Into<String>,
        session: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        let session = non_blank(Some(session.into()))
            .ok_or_else(|| Error::Config(format!("{SESSION_ENV} must not be empty")))?;
        let csrf_token = non_blank(Some(csrf_token.into()))
            .ok_or_else(|| Error::Config(format!("{CSRF_TOKEN_ENV} must not be empty")))?;

        Ok(Self {
            base_url,
            session,
            csrf_token,
            request_delay: DEFAULT_REQUEST_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` delegates here.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let session = non_blank(lookup(SESSION_ENV))
            .ok_or_else(|| Error::Config(format!("{SESSION_ENV} is not set")))?;
        let csrf_token = non_blank(lookup(CSRF_TOKEN_ENV))
            .ok_or_else(|| Error::Config(format!("{CSRF_TOKEN_ENV} is not set")))?;
        let base_url = non_blank(lookup(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(base_url, session, csrf_token)
    }

    #[must_use]
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for JudgeConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JudgeConfig")
            .field("base_url", &self.base_url)
            .field("session", &"[REDACTED]")
            .field("csrf_token", &"[REDACTED]")
            .field("request_delay", &self.request_delay)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Where pushes go and how they authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum PushConfig {
    /// Commit locally only.
    Disabled,
    /// Push each commit to `remote`, injecting `token` into http(s) URLs.
    Remote {
        remote: String,
        token: Option<String>,
    },
}

impl fmt::Debug for PushConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => formatter.write_str("Disabled"),
            Self::Remote { remote, token } => formatter
                .debug_struct("Remote")
                .field("remote", remote)
                .field("token", &token.as_ref().map(|_| "[REDACTED]"))
                .finish(),
        }
    }
}

/// Everything a full sync run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Working tree of the archive repository
    pub repo_path: PathBuf,
    pub judge: JudgeConfig,
    pub push: PushConfig,
}

impl SyncConfig {
    /// Build from the process environment.
    ///
    /// When `push` is true, `GITHUB_TOKEN` is required.
    pub fn from_env(repo_path: impl Into<PathBuf>, push: bool) -> Result<Self> {
        Self::from_lookup(repo_path, push, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        repo_path: impl Into<PathBuf>,
        push: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let judge = JudgeConfig::from_lookup(&lookup)?;
        let push = if push {
            let token = non_blank(lookup(PUSH_TOKEN_ENV)).ok_or_else(|| {
                Error::Config(format!(
                    "{PUSH_TOKEN_ENV} is not set (pass --no-push to commit locally only)"
                ))
            })?;
            PushConfig::Remote {
                remote: DEFAULT_REMOTE.to_string(),
                token: Some(token),
            }
        } else {
            PushConfig::Disabled
        };

        Ok(Self {
            repo_path: repo_path.into(),
            judge,
            push,
        })
    }
}

/// Trimmed value, or `None` when unset or blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// An absolute http(s) URL with a host.
pub(crate) fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

fn normalize_base_url(raw: String) -> Result<String> {
    let url = non_blank(Some(raw))
        .ok_or_else(|| Error::Config("judge base URL must not be empty".to_string()))?;
    if is_http_url(&url) {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(
            "judge base URL must include http:// or https://".to_string(),
        ))
    }
}
