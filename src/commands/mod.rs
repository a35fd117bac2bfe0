//! Command dispatch and handlers.

pub mod commit;
pub mod create;
pub mod init;
pub mod inspect;
pub mod remote;
pub mod undo;
pub mod vars;

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::git::Git;

/// What every handler works with: ports, settings and the target directory.
pub struct Invocation<'a> {
    /// Port implementations.
    pub ctx: &'a ServiceContext,
    /// Resolved settings, with command-line overrides applied.
    pub settings: &'a Settings,
    /// Absolute directory the command operates in.
    pub cwd: PathBuf,
}

impl<'a> Invocation<'a> {
    /// Bundles the pieces a handler needs.
    pub fn new(ctx: &'a ServiceContext, settings: &'a Settings, cwd: PathBuf) -> Self {
        Self { ctx, settings, cwd }
    }

    /// Git handle for `cwd` honouring the configured timeout.
    pub fn git(&self) -> Git<'_> {
        Git::new(self.ctx.runner.as_ref(), &self.cwd).with_timeout(self.settings.timeout)
    }
}

/// Dispatch a parsed command line to its handler.
///
/// When `INITGIT_RECORD` names a directory, runner and clock interactions
/// are recorded to per-port cassette files beneath it.
///
/// # Errors
///
/// Returns an error if settings are invalid, the directory is unusable, or
/// the selected handler fails.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if cli.timeout.is_some() {
        settings.timeout = cli.timeout;
    }
    let cwd = resolve_cwd(cli.cwd.as_deref())?;

    if let Some(base) = settings.record_dir.clone() {
        let (ctx, session) = ServiceContext::recording_at(&base, &cwd)?;
        let result = dispatch_with_context(&cli.command, &Invocation::new(&ctx, &settings, cwd));

        // Drop context first to release Arc references
        drop(ctx);
        let output_dir = session.finish()?;
        eprintln!("Recording saved to: {}", output_dir.display());
        return result;
    }

    let ctx = ServiceContext::live();
    dispatch_with_context(&cli.command, &Invocation::new(&ctx, &settings, cwd))
}

/// Dispatch a command with the given invocation.
///
/// # Errors
///
/// Returns whatever the handler returns.
pub fn dispatch_with_context(command: &Command, inv: &Invocation<'_>) -> Result<()> {
    match command {
        Command::Init(args) => init::run(inv, args),
        Command::Create(args) => create::run(inv, args),
        Command::Scaffold(args) => init::run_scaffold(inv, args),
        Command::Add => commit::run_add(inv),
        Command::Commit { message } => commit::run(inv, message.as_deref()),
        Command::Status => inspect::status(inv),
        Command::Log => inspect::log(inv),
        Command::Branch => inspect::branches(inv),
        Command::Diff => inspect::diff(inv),
        Command::Push(args) => remote::push(inv, args),
        Command::Pull(args) => remote::pull(inv, args),
        Command::Fetch { remote } => remote::fetch(inv, remote.as_deref()),
        Command::Discard { file } => undo::discard(inv, file),
        Command::Uncommit => undo::uncommit(inv),
        Command::Reset { file } => undo::reset(inv, file.as_deref()),
        Command::HardReset { hash } => undo::hard_reset(inv, hash),
        Command::Revert { hash } => undo::revert(inv, hash),
        Command::Vars => vars::run(inv),
    }
}

/// Absolute form of the requested directory, which must exist.
///
/// # Errors
///
/// Returns [`Error::Usage`] when the path is missing or not a directory.
pub fn resolve_cwd(requested: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir().map_err(|e| Error::file(".", e))?;
    let cwd = match requested {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => current.join(path),
        None => current,
    };
    if !cwd.exists() {
        return Err(Error::Usage(format!("the specified directory does not exist: {}", cwd.display())));
    }
    if !cwd.is_dir() {
        return Err(Error::Usage(format!(
            "the specified path is not a directory: {}",
            cwd.display()
        )));
    }
    Ok(cwd)
}

fn success(message: &str) {
    println!("{}", message.green().bold());
}

fn notice(message: &str) {
    println!("{}", message.yellow().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_cwd_accepts_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_cwd(Some(dir.path())).unwrap(), dir.path());
    }

    #[test]
    fn resolve_cwd_rejects_missing_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = resolve_cwd(Some(&dir.path().join("nope"))).unwrap_err();
        assert!(missing.to_string().contains("does not exist"));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let not_dir = resolve_cwd(Some(&file)).unwrap_err();
        assert!(not_dir.to_string().contains("not a directory"));
        assert_eq!(not_dir.exit_code(), 2);
    }

    #[test]
    fn resolve_cwd_defaults_to_current_directory() {
        assert_eq!(resolve_cwd(None).unwrap(), std::env::current_dir().unwrap());
    }
}
