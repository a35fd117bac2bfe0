//! `initgit vars`: print what the other commands would use.

use chrono::Datelike;
use colored::Colorize;

use crate::error::Result;
use crate::scaffold::{default_repo_name, load_gitignore, ProjectFiles};

use super::Invocation;

/// Execute the `vars` command.
///
/// # Errors
///
/// Returns an error if a configured gitignore template cannot be read.
pub fn run(inv: &Invocation<'_>) -> Result<()> {
    let settings = inv.settings;
    let gitignore = load_gitignore(inv.ctx.fs.as_ref(), settings.gitignore_template.as_deref())?;
    let name = default_repo_name(&inv.cwd);
    let files = ProjectFiles::render(
        &name,
        None,
        settings.licence_holder(),
        inv.ctx.clock.now().year(),
        &gitignore,
    );
    let unset = || "(unset)".to_string();

    println!("{}", format!("Current working directory: {}", inv.cwd.display()).cyan());
    println!("{}", format!("Repository name: {name}").cyan());
    println!(
        "{}",
        format!("GitHub username: {}", settings.github_username.clone().unwrap_or_else(unset))
            .blue()
    );
    println!("{}", format!("Branch: {}", settings.branch).blue());
    println!("{}", format!("Remote: {}", settings.remote).blue());
    println!(
        "{}",
        format!(
            "Timeout: {}",
            settings.timeout.map_or_else(unset, |t| format!("{}s", t.as_secs()))
        )
        .blue()
    );
    println!("{}", format!("Gitignore file content:\n{}", files.gitignore.trim_end()).green());
    println!("{}", format!("License file content:\n{}", files.license.trim_end()).magenta());
    Ok(())
}
