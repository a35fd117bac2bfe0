//! `push`, `pull` and `fetch`.

use crate::cli::RemoteArgs;
use crate::error::Result;

use super::{success, Invocation};

fn target<'a>(inv: &'a Invocation<'_>, args: &'a RemoteArgs) -> (&'a str, &'a str) {
    (
        args.remote.as_deref().unwrap_or(&inv.settings.remote),
        args.branch.as_deref().unwrap_or(&inv.settings.branch),
    )
}

/// Execute the `push` command.
///
/// # Errors
///
/// Returns an error if `git push` fails.
pub fn push(inv: &Invocation<'_>, args: &RemoteArgs) -> Result<()> {
    let (remote, branch) = target(inv, args);
    inv.git().push(remote, branch)?;
    success(&format!("Pushed {branch} to {remote} from {}", inv.cwd.display()));
    Ok(())
}

/// Execute the `pull` command.
///
/// # Errors
///
/// Returns an error if `git pull` fails.
pub fn pull(inv: &Invocation<'_>, args: &RemoteArgs) -> Result<()> {
    let (remote, branch) = target(inv, args);
    let result = inv.git().pull(remote, branch)?;
    if !result.stdout.is_empty() {
        println!("{}", result.stdout);
    }
    success(&format!("Pulled {branch} from {remote} into {}", inv.cwd.display()));
    Ok(())
}

/// Execute the `fetch` command.
///
/// # Errors
///
/// Returns an error if `git fetch` fails.
pub fn fetch(inv: &Invocation<'_>, remote: Option<&str>) -> Result<()> {
    let remote = remote.unwrap_or(&inv.settings.remote);
    inv.git().fetch(remote)?;
    success(&format!("Fetched from {remote} in {}", inv.cwd.display()));
    Ok(())
}
