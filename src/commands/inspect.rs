//! Read-only git views: `status`, `log`, `branch` and `diff`.

use colored::{Color, Colorize};

use crate::error::Result;
use crate::ports::runner::CommandResult;

use super::Invocation;

/// Execute the `status` command.
///
/// # Errors
///
/// Returns an error if `git status` fails.
pub fn status(inv: &Invocation<'_>) -> Result<()> {
    show(inv, "status", Color::Yellow, &inv.git().status()?);
    Ok(())
}

/// Execute the `log` command.
///
/// # Errors
///
/// Returns an error if `git log` fails, which includes a repository with
/// no commits yet.
pub fn log(inv: &Invocation<'_>) -> Result<()> {
    show(inv, "log", Color::Blue, &inv.git().log()?);
    Ok(())
}

/// Execute the `branch` command.
///
/// # Errors
///
/// Returns an error if `git branch` fails.
pub fn branches(inv: &Invocation<'_>) -> Result<()> {
    show(inv, "branches", Color::Magenta, &inv.git().branches()?);
    Ok(())
}

/// Execute the `diff` command.
///
/// # Errors
///
/// Returns an error if `git diff` fails.
pub fn diff(inv: &Invocation<'_>) -> Result<()> {
    show(inv, "diff", Color::Green, &inv.git().diff()?);
    Ok(())
}

fn show(inv: &Invocation<'_>, what: &str, color: Color, result: &CommandResult) {
    println!("{}", format!("Git {what} in {}:", inv.cwd.display()).color(color).bold());
    if !result.stdout.is_empty() {
        println!("{}", result.stdout);
    }
}
