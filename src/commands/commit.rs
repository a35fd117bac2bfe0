//! `initgit add` and `initgit commit`.

use crate::error::{Error, Result};
use crate::git::CommitOutcome;

use super::{notice, success, Invocation};

/// Format of the default commit message.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stage everything in the working directory.
///
/// # Errors
///
/// Returns an error if `git add` fails.
pub fn run_add(inv: &Invocation<'_>) -> Result<()> {
    inv.git().add_all()?;
    success(&format!("Files staged in {}", inv.cwd.display()));
    Ok(())
}

/// Execute the `commit` command.
///
/// # Errors
///
/// Returns an error outside a repository or when `git commit` fails for a
/// reason other than an empty index.
pub fn run(inv: &Invocation<'_>, message: Option<&str>) -> Result<()> {
    commit(inv, message).map(|_| ())
}

/// Commit the index, choosing the message as follows: no message means the
/// current UTC timestamp, and a message equal to the previous commit's gets
/// the timestamp appended.
///
/// # Errors
///
/// Returns [`Error::Usage`] when there is no `.git` directory.
pub fn commit(inv: &Invocation<'_>, message: Option<&str>) -> Result<CommitOutcome> {
    let git_dir = inv.cwd.join(".git");
    if !inv.ctx.fs.exists(&git_dir) {
        return Err(Error::Usage(format!(
            "no git repository found in {}; run `initgit init` first",
            inv.cwd.display()
        )));
    }

    let message = commit_message(inv, message);
    let outcome = inv.git().commit(&message)?;
    match &outcome {
        CommitOutcome::Committed(_) => {
            success(&format!("Changes committed in {} with message: {message}", inv.cwd.display()));
        }
        CommitOutcome::NothingToCommit(result) => {
            tracing::warn!(stdout = %result.stdout, "git commit found nothing to commit");
            notice("No changes to commit. Stage files first.");
        }
    }
    Ok(outcome)
}

fn commit_message(inv: &Invocation<'_>, requested: Option<&str>) -> String {
    let timestamp = || inv.ctx.clock.now().format(TIMESTAMP_FORMAT).to_string();
    let Some(message) = requested.map(str::trim).filter(|m| !m.is_empty()) else {
        return timestamp();
    };

    let previous = inv.ctx.fs.read_to_string(&inv.cwd.join(".git").join("COMMIT_EDITMSG")).ok();
    if previous.is_some_and(|p| p.trim() == message) {
        format!("{message} {}", timestamp())
    } else {
        message.to_string()
    }
}
