//! Commands that throw work away: `discard`, `uncommit`, `reset`,
//! `hard-reset` and `revert`.

use crate::error::{Error, Result};

use super::{notice, success, Invocation};

/// Execute the `discard` command.
///
/// # Errors
///
/// Returns an error if `git checkout` fails.
pub fn discard(inv: &Invocation<'_>, file: &str) -> Result<()> {
    inv.git().discard(non_empty(file, "file")?)?;
    notice(&format!("Unstaged changes discarded for {file}"));
    Ok(())
}

/// Execute the `uncommit` command.
///
/// # Errors
///
/// Returns an error if `git reset --soft` fails.
pub fn uncommit(inv: &Invocation<'_>) -> Result<()> {
    inv.git().uncommit()?;
    notice("Last commit undone; its changes are still staged.");
    Ok(())
}

/// Execute the `reset` command: unstage `file`, or undo the last commit
/// when no file is given.
///
/// # Errors
///
/// Returns an error if the git command fails.
pub fn reset(inv: &Invocation<'_>, file: Option<&str>) -> Result<()> {
    match file {
        Some(file) => {
            inv.git().unstage(non_empty(file, "file")?)?;
            notice(&format!("Unstaged {file}"));
        }
        None => uncommit(inv)?,
    }
    success(&format!("Reset operation completed in {}", inv.cwd.display()));
    Ok(())
}

/// Execute the `hard-reset` command.
///
/// # Errors
///
/// Returns an error if `git reset --hard` fails.
pub fn hard_reset(inv: &Invocation<'_>, hash: &str) -> Result<()> {
    inv.git().hard_reset(non_empty(hash, "commit hash")?)?;
    notice(&format!("Hard reset to {hash}; newer commits were discarded."));
    Ok(())
}

/// Execute the `revert` command.
///
/// # Errors
///
/// Returns an error if `git revert` fails.
pub fn revert(inv: &Invocation<'_>, hash: &str) -> Result<()> {
    inv.git().revert(non_empty(hash, "commit hash")?)?;
    success(&format!("Reverted {hash} with a new commit."));
    Ok(())
}

fn non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Usage(format!("{what} cannot be empty")));
    }
    Ok(value)
}
