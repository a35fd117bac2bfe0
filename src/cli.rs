//! CLI argument definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::github::Visibility;

/// Top-level CLI parser for `initgit`.
#[derive(Debug, Parser)]
#[command(
    name = "initgit",
    version,
    about = "Initialize a git repository, create its GitHub remote, or run everyday git chores"
)]
pub struct Cli {
    /// Directory to operate in. Defaults to the current directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Kill any git or gh command still running after this many seconds.
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Log each command as it runs.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a repository, write starter files, stage and commit.
    Init(InitArgs),
    /// Initialize locally, then create the GitHub repository and push.
    Create(CreateArgs),
    /// Write .gitignore, README.md and LICENSE.txt without touching git.
    Scaffold(ScaffoldArgs),
    /// Stage all files in the directory.
    Add,
    /// Commit staged files.
    Commit {
        /// Commit message. Defaults to the current UTC timestamp.
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Show the working tree status.
    Status,
    /// Show the commit log, one line per commit.
    Log,
    /// List local and remote branches.
    Branch,
    /// Show unstaged changes.
    Diff,
    /// Push the branch to the remote and set upstream.
    Push(RemoteArgs),
    /// Pull the branch from the remote.
    Pull(RemoteArgs),
    /// Fetch from the remote.
    Fetch {
        /// Remote to fetch from.
        #[arg(long)]
        remote: Option<String>,
    },
    /// Discard unstaged changes to a file.
    Discard {
        /// File whose edits are thrown away.
        file: String,
    },
    /// Undo the last commit, keeping its changes staged.
    Uncommit,
    /// Unstage a file, or undo the last commit when no file is given.
    Reset {
        /// File to unstage.
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Hard reset to a commit, discarding newer commits.
    HardReset {
        /// Commit to reset to.
        #[arg(value_name = "HASH")]
        hash: String,
    },
    /// Create a commit that undoes a pushed commit.
    Revert {
        /// Commit to revert.
        #[arg(value_name = "HASH")]
        hash: String,
    },
    /// Print the resolved settings and templates.
    Vars,
}

/// Options shared by `init` and `create`.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Repository description written to README.md.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Message for the initial commit. Defaults to the current UTC timestamp.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Initial branch name.
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Repository name. Defaults to the title-cased directory name.
    #[arg(short = 'r', long = "repo", value_name = "NAME")]
    pub repo: Option<String>,
}

/// Options for `create`.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub init: InitArgs,

    /// GitHub account that will own the repository.
    #[arg(short, long)]
    pub username: Option<String>,

    /// Repository visibility.
    #[arg(short, long, value_enum, default_value_t = Visibility::Public)]
    pub visibility: Visibility,

    /// Remote name to register.
    #[arg(long)]
    pub remote: Option<String>,

    /// Homepage URL for the repository.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Let `gh` prompt for the repository details.
    #[arg(long)]
    pub interactive: bool,
}

/// Options for `scaffold`.
#[derive(Debug, Clone, Args)]
pub struct ScaffoldArgs {
    /// Repository description written to README.md.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Repository name. Defaults to the title-cased directory name.
    #[arg(short = 'r', long = "repo", value_name = "NAME")]
    pub repo: Option<String>,
}

/// Remote and branch for `push` and `pull`.
#[derive(Debug, Clone, Args)]
pub struct RemoteArgs {
    /// Remote name.
    #[arg(long)]
    pub remote: Option<String>,

    /// Branch name.
    #[arg(short, long)]
    pub branch: Option<String>,
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    crate::config::parse_timeout(raw).map_err(|e| e.to_string())
}
