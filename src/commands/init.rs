//! `initgit init` and `initgit scaffold`.

use std::path::PathBuf;

use chrono::Datelike;

use crate::cli::{InitArgs, ScaffoldArgs};
use crate::error::{Error, Result};
use crate::scaffold::{default_repo_name, load_gitignore, ProjectFiles};

use super::{commit, success, Invocation};

/// Execute the `init` command.
///
/// # Errors
///
/// Returns an error if any git step or file write fails.
pub fn run(inv: &Invocation<'_>, args: &InitArgs) -> Result<()> {
    initialize(inv, args).map(|_| ())
}

/// `git init`, starter files, `git add .` and the first commit.
///
/// Returns the repository name used for the README.
///
/// # Errors
///
/// Returns an error if any git step or file write fails.
pub fn initialize(inv: &Invocation<'_>, args: &InitArgs) -> Result<String> {
    let branch = args.branch.as_deref().unwrap_or(&inv.settings.branch);
    let name = repo_name(inv, args.repo.as_deref())?;

    inv.git().init(branch)?;
    success(&format!("Initialized git repository in {} on branch {branch}", inv.cwd.display()));

    scaffold(inv, &name, args.description.as_deref())?;
    super::commit::run_add(inv)?;
    commit::commit(inv, args.message.as_deref())?;
    Ok(name)
}

/// Execute the `scaffold` command.
///
/// # Errors
///
/// Returns an error if the gitignore template cannot be read or a file
/// cannot be written.
pub fn run_scaffold(inv: &Invocation<'_>, args: &ScaffoldArgs) -> Result<()> {
    let name = repo_name(inv, args.repo.as_deref())?;
    scaffold(inv, &name, args.description.as_deref()).map(|_| ())
}

fn scaffold(inv: &Invocation<'_>, name: &str, description: Option<&str>) -> Result<Vec<PathBuf>> {
    let gitignore = load_gitignore(inv.ctx.fs.as_ref(), inv.settings.gitignore_template.as_deref())?;
    let year = inv.ctx.clock.now().year();
    let files =
        ProjectFiles::render(name, description, inv.settings.licence_holder(), year, &gitignore);

    let written = files.write_to(inv.ctx.fs.as_ref(), &inv.cwd)?;
    if written.is_empty() {
        super::notice("Starter files already present; nothing written.");
    } else {
        success(&format!("Starter files created in {}", inv.cwd.display()));
    }
    Ok(written)
}

pub(super) fn repo_name(inv: &Invocation<'_>, requested: Option<&str>) -> Result<String> {
    let name = match requested.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_repo_name(&inv.cwd),
    };
    if name.is_empty() {
        return Err(Error::Usage(format!(
            "cannot derive a repository name from {}; pass --repo",
            inv.cwd.display()
        )));
    }
    Ok(name)
}
