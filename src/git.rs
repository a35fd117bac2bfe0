//! Git operations issued through the command runner.

use std::path::Path;
use std::time::Duration;

use crate::error::RunError;
use crate::ports::runner::{CommandResult, CommandRunner, CommandSpec};

/// Outcome of `git commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created.
    Committed(CommandResult),
    /// Git exited 1 and reported that the index had nothing new.
    NothingToCommit(CommandResult),
}

/// A git working tree driven through a [`CommandRunner`].
///
/// Every call is strict: a nonzero exit from git is a [`RunError::Failure`].
/// Network operations disable git's credential prompt so a missing login
/// fails instead of waiting on a terminal that is not attached.
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    workdir: &'a Path,
    timeout: Option<Duration>,
}

impl<'a> Git<'a> {
    /// Creates a handle for the repository at `workdir`.
    pub fn new(runner: &'a dyn CommandRunner, workdir: &'a Path) -> Self {
        Self { runner, workdir, timeout: None }
    }

    /// Applies a time budget to every command.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spec(&self, args: &[&str]) -> CommandSpec {
        CommandSpec::new("git").args(args.iter().copied()).cwd(self.workdir).timeout(self.timeout)
    }

    fn run(&self, args: &[&str]) -> Result<CommandResult, RunError> {
        self.runner.run(&self.spec(args))
    }

    fn run_remote(&self, args: &[&str]) -> Result<CommandResult, RunError> {
        self.runner.run(&self.spec(args).env("GIT_TERMINAL_PROMPT", "0"))
    }

    /// `git init -b <branch>`
    pub fn init(&self, branch: &str) -> Result<CommandResult, RunError> {
        self.run(&["init", "-b", branch])
    }

    /// `git add .`
    pub fn add_all(&self) -> Result<CommandResult, RunError> {
        self.run(&["add", "."])
    }

    /// `git commit -m <message>`
    pub fn commit(&self, message: &str) -> Result<CommitOutcome, RunError> {
        match self.run(&["commit", "-m", message]) {
            Ok(result) => Ok(CommitOutcome::Committed(result)),
            Err(RunError::Failure(result))
                if result.exit_status == 1 && reports_nothing_to_commit(&result.stdout) =>
            {
                Ok(CommitOutcome::NothingToCommit(*result))
            }
            Err(err) => Err(err),
        }
    }

    /// `git status`
    pub fn status(&self) -> Result<CommandResult, RunError> {
        self.run(&["status"])
    }

    /// `git log --oneline`
    pub fn log(&self) -> Result<CommandResult, RunError> {
        self.run(&["log", "--oneline"])
    }

    /// `git branch -a`
    pub fn branches(&self) -> Result<CommandResult, RunError> {
        self.run(&["branch", "-a"])
    }

    /// `git diff`
    pub fn diff(&self) -> Result<CommandResult, RunError> {
        self.run(&["diff"])
    }

    /// `git push -u <remote> <branch>`
    pub fn push(&self, remote: &str, branch: &str) -> Result<CommandResult, RunError> {
        self.run_remote(&["push", "-u", remote, branch])
    }

    /// `git pull --no-edit <remote> <branch>`
    pub fn pull(&self, remote: &str, branch: &str) -> Result<CommandResult, RunError> {
        self.run_remote(&["pull", "--no-edit", remote, branch])
    }

    /// `git fetch <remote>`
    pub fn fetch(&self, remote: &str) -> Result<CommandResult, RunError> {
        self.run_remote(&["fetch", remote])
    }

    /// Throws away unstaged edits to `file`.
    pub fn discard(&self, file: &str) -> Result<CommandResult, RunError> {
        self.run(&["checkout", "--", file])
    }

    /// Removes `file` from the index, keeping the working copy.
    pub fn unstage(&self, file: &str) -> Result<CommandResult, RunError> {
        self.run(&["reset", "HEAD", "--", file])
    }

    /// Drops the last commit but keeps its changes staged.
    pub fn uncommit(&self) -> Result<CommandResult, RunError> {
        self.run(&["reset", "--soft", "HEAD~1"])
    }

    /// Moves the branch to `commit`, discarding everything newer.
    pub fn hard_reset(&self, commit: &str) -> Result<CommandResult, RunError> {
        self.run(&["reset", "--hard", commit])
    }

    /// Adds a commit undoing `commit`.
    pub fn revert(&self, commit: &str) -> Result<CommandResult, RunError> {
        self.run(&["revert", "--no-edit", commit])
    }

    /// `git branch -m <branch>`
    pub fn rename_branch(&self, branch: &str) -> Result<CommandResult, RunError> {
        self.run(&["branch", "-m", branch])
    }

    /// `git remote add <name> <url>`
    pub fn add_remote(&self, name: &str, url: &str) -> Result<CommandResult, RunError> {
        self.run(&["remote", "add", name, url])
    }
}

/// Git also exits 1 when a hook rejects the commit, so only its own
/// empty-index messages count.
fn reports_nothing_to_commit(stdout: &str) -> bool {
    ["nothing to commit", "nothing added to commit", "no changes added to commit"]
        .iter()
        .any(|phrase| stdout.contains(phrase))
}
