//! `initgit create`: local repository plus its GitHub remote.

use colored::Colorize;

use crate::cli::CreateArgs;
use crate::error::{Error, Result, RunError};
use crate::github::RepoRequest;
use crate::ports::runner::CommandResult;

use super::{init, notice, success, Invocation};

/// One command run while creating the remote, and how it ended.
#[derive(Debug)]
pub struct Step {
    /// Command line that was run.
    pub command: String,
    /// Exit status, or the error that stopped it.
    pub outcome: std::result::Result<i32, String>,
}

impl Step {
    fn finished(result: &CommandResult) -> Self {
        Self { command: result.command_line(), outcome: Ok(result.exit_status) }
    }

    fn failed(command: String, err: &RunError) -> Self {
        Self { command, outcome: Err(err.to_string()) }
    }

    fn succeeded(&self) -> bool {
        matches!(self.outcome, Ok(0))
    }
}

/// Execute the `create` command.
///
/// # Errors
///
/// Returns an error if the request is invalid, local initialization fails,
/// or both `gh` and the plain-git fallback fail.
pub fn run(inv: &Invocation<'_>, args: &CreateArgs) -> Result<()> {
    let request = RepoRequest {
        owner: args.username.clone().or_else(|| inv.settings.github_username.clone()),
        visibility: args.visibility,
        remote: args.remote.clone(),
        description: args.init.description.clone(),
        homepage: args.url.clone(),
        interactive: args.interactive,
        ..RepoRequest::new(init::repo_name(inv, args.init.repo.as_deref())?, inv.cwd.clone())
    };
    request.validate()?;

    init::initialize(inv, &args.init)?;

    let branch = args.init.branch.as_deref().unwrap_or(&inv.settings.branch);
    let remote = args.remote.as_deref().unwrap_or(&inv.settings.remote);
    let mut steps = Vec::new();
    let result = create_remote(inv, &request, branch, remote, &mut steps);
    print_summary(&request, &steps);
    result
}

/// Runs `gh repo create`, falling back to plain git when `gh` is missing or
/// exits 1. Every attempted command is appended to `steps`.
///
/// # Errors
///
/// Returns the `gh` error when it is not eligible for the fallback, or the
/// first fallback error.
pub fn create_remote(
    inv: &Invocation<'_>,
    request: &RepoRequest,
    branch: &str,
    remote: &str,
    steps: &mut Vec<Step>,
) -> Result<()> {
    // gh prompts on the terminal in interactive mode; no budget applies.
    let timeout = if request.interactive { None } else { inv.settings.timeout };
    let spec = request.gh_command().cwd(&inv.cwd).timeout(timeout);

    match inv.ctx.runner.run(&spec) {
        Ok(result) => {
            steps.push(Step::finished(&result));
            return Ok(());
        }
        Err(err) => {
            steps.push(Step::failed(spec.display(), &err));
            let eligible = match &err {
                RunError::NotFound { .. } => true,
                RunError::Failure(result) => result.exit_status == 1,
                _ => false,
            };
            if !eligible {
                return Err(err.into());
            }
            tracing::warn!(error = %err, "gh repo create failed; falling back to plain git");
            notice("gh repo create failed, trying plain git");
        }
    }

    let url = request.clone_url().ok_or_else(|| {
        Error::Usage("a GitHub username is required to add the remote; pass --username".into())
    })?;

    let git = inv.git();
    record(steps, format!("git branch -m {branch}"), git.rename_branch(branch))?;
    record(steps, format!("git remote add {remote} {url}"), git.add_remote(remote, &url))?;
    record(steps, format!("git push -u {remote} {branch}"), git.push(remote, branch))?;
    Ok(())
}

fn record(
    steps: &mut Vec<Step>,
    command: String,
    outcome: std::result::Result<CommandResult, RunError>,
) -> Result<()> {
    match outcome {
        Ok(result) => {
            steps.push(Step::finished(&result));
            Ok(())
        }
        Err(err) => {
            steps.push(Step::failed(command, &err));
            Err(err.into())
        }
    }
}

fn print_summary(request: &RepoRequest, steps: &[Step]) {
    let ok = steps.iter().filter(|s| s.succeeded()).count();
    if steps.last().is_some_and(Step::succeeded) {
        success(&format!("Repository {} created and added as a remote.", request.full_name()));
    } else {
        println!(
            "{}",
            format!("Failed to create remote repository {}.", request.full_name()).red().bold()
        );
    }
    println!("{}", format!("{ok} of {} commands succeeded:", steps.len()).magenta());
    for step in steps {
        match &step.outcome {
            Ok(status) => println!("{}", format!("{} -> {status}", step.command).green()),
            Err(message) => println!("{}", format!("Error: {message}").red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Settings;
    use crate::github::Visibility;
    use crate::test_support::{context, invocation, ScriptedRunner};

    fn request(dir: &std::path::Path) -> RepoRequest {
        RepoRequest { owner: Some("octocat".into()), ..RepoRequest::new("Demo", dir) }
    }

    #[test]
    fn gh_success_skips_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        let ctx = context(&runner);
        let settings = Settings::default();
        let mut steps = Vec::new();

        create_remote(
            &invocation(&ctx, &settings, dir.path()),
            &request(dir.path()),
            "master",
            "origin",
            &mut steps,
        )
        .unwrap();

        assert_eq!(runner.specs().len(), 1);
        assert_eq!(runner.specs()[0].program, "gh");
        assert_eq!(steps.len(), 1);
        assert!(steps[0].succeeded());
    }

    #[test]
    fn missing_gh_falls_back_to_git() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(ScriptedRunner::new().not_found("gh"));
        let ctx = context(&runner);
        let settings = Settings::default();
        let mut steps = Vec::new();

        create_remote(
            &invocation(&ctx, &settings, dir.path()),
            &request(dir.path()),
            "master",
            "origin",
            &mut steps,
        )
        .unwrap();

        assert_eq!(
            runner.command_lines()[1..],
            [
                "git branch -m master",
                "git remote add origin https://github.com/octocat/Demo.git",
                "git push -u origin master",
            ]
        );
        assert!(steps[0].outcome.is_err());
        assert!(steps[1..].iter().all(Step::succeeded));
    }

    #[test]
    fn gh_exit_one_falls_back_but_other_codes_do_not() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();

        let runner = Arc::new(ScriptedRunner::new().exit_with(&["gh"], 1, ""));
        let ctx = context(&runner);
        let inv = invocation(&ctx, &settings, dir.path());
        create_remote(&inv, &request(dir.path()), "master", "origin", &mut Vec::new()).unwrap();
        assert_eq!(runner.specs().len(), 4);

        let runner = Arc::new(ScriptedRunner::new().exit_with(&["gh"], 4, ""));
        let ctx = context(&runner);
        let inv = invocation(&ctx, &settings, dir.path());
        let err = create_remote(&inv, &request(dir.path()), "master", "origin", &mut Vec::new());
        assert_eq!(err.unwrap_err().exit_code(), 4);
        assert_eq!(runner.specs().len(), 1);
    }

    #[test]
    fn fallback_failure_stops_remaining_steps() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(
            ScriptedRunner::new().not_found("gh").exit_with(&["git", "remote"], 3, ""),
        );
        let ctx = context(&runner);
        let settings = Settings::default();
        let mut steps = Vec::new();

        let err = create_remote(
            &invocation(&ctx, &settings, dir.path()),
            &request(dir.path()),
            "master",
            "origin",
            &mut steps,
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert_eq!(steps.len(), 3);
        assert!(!runner.command_lines().iter().any(|c| c.starts_with("git push")));
    }

    #[test]
    fn fallback_needs_an_owner() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(ScriptedRunner::new().not_found("gh"));
        let ctx = context(&runner);
        let settings = Settings::default();
        let anonymous = RepoRequest::new("Demo", dir.path());

        let err = create_remote(
            &invocation(&ctx, &settings, dir.path()),
            &anonymous,
            "master",
            "origin",
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn interactive_gh_has_no_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        let ctx = context(&runner);
        let settings =
            Settings { timeout: Some(std::time::Duration::from_secs(5)), ..Settings::default() };
        let interactive = RepoRequest { interactive: true, ..request(dir.path()) };

        create_remote(
            &invocation(&ctx, &settings, dir.path()),
            &interactive,
            "master",
            "origin",
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(runner.specs()[0].timeout, None);
    }

    #[test]
    fn full_create_initializes_then_creates_remote() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        let ctx = context(&runner);
        let settings = Settings::default();
        let args = CreateArgs {
            init: crate::cli::InitArgs {
                repo: Some("Demo".into()),
                message: Some("Initial".into()),
                ..crate::cli::InitArgs::default()
            },
            username: Some("octocat".into()),
            visibility: Visibility::Private,
            remote: None,
            url: None,
            interactive: false,
        };

        run(&invocation(&ctx, &settings, dir.path()), &args).unwrap();

        let lines = runner.command_lines();
        assert_eq!(lines[..3], ["git init -b master", "git add .", "git commit -m Initial"]);
        assert_eq!(
            lines[3],
            format!("gh repo create octocat/Demo --source={} --private", dir.path().display())
        );
    }

    #[test]
    fn relative_homepage_is_rejected_before_running_anything() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(ScriptedRunner::new());
        let ctx = context(&runner);
        let settings = Settings::default();
        let args = CreateArgs {
            init: crate::cli::InitArgs::default(),
            username: None,
            visibility: Visibility::Public,
            remote: None,
            url: Some("example.com".into()),
            interactive: false,
        };

        let err = run(&invocation(&ctx, &settings, dir.path()), &args).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(runner.specs().is_empty());
    }
}
