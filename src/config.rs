//! Settings resolved from the environment.
//!
//! `main` loads a `.env` file with `dotenvy` before anything reads these, so
//! values may come from either place. Command-line flags override them.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default branch for new repositories.
pub const DEFAULT_BRANCH: &str = "master";
/// Default remote name.
pub const DEFAULT_REMOTE: &str = "origin";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// GitHub account used as the owner of created repositories.
    pub github_username: Option<String>,
    /// Branch created by `init` and pushed by `push`/`pull`.
    pub branch: String,
    /// Remote used by `push`, `pull`, `fetch` and `create`.
    pub remote: String,
    /// Per-command time budget.
    pub timeout: Option<Duration>,
    /// Gitignore template file; the built-in template is used when unset.
    pub gitignore_template: Option<PathBuf>,
    /// Copyright holder named in the licence.
    pub author: Option<String>,
    /// Base directory for cassette recording.
    pub record_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_username: None,
            branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            timeout: None,
            gitignore_template: None,
            author: None,
            record_dir: None,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `INITGIT_TIMEOUT_SECS` is not a
    /// positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let timeout = get("INITGIT_TIMEOUT_SECS").map(|raw| parse_timeout(&raw)).transpose()?;

        Ok(Self {
            github_username: get("GITHUB_USERNAME"),
            branch: get("INITGIT_BRANCH").unwrap_or(defaults.branch),
            remote: get("INITGIT_REMOTE").unwrap_or(defaults.remote),
            timeout,
            gitignore_template: get("GITIGNORE_TEXTFILE").map(PathBuf::from),
            author: get("INITGIT_AUTHOR"),
            record_dir: get("INITGIT_RECORD").map(PathBuf::from),
        })
    }

    /// Licence holder: the configured author, else the GitHub username.
    pub fn licence_holder(&self) -> &str {
        self.author.as_deref().or(self.github_username.as_deref()).unwrap_or("the authors")
    }
}

/// Parses a whole number of seconds; zero is rejected.
///
/// # Errors
///
/// Returns [`Error::Config`] for anything but a positive integer.
pub fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::Config(format!(
            "invalid timeout `{raw}`: expected a positive number of seconds"
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}
