//! Command runner port for executing external programs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RunError;

/// A fully described external command invocation.
///
/// Built with [`CommandSpec::new`] and the chained setters, or from a raw
/// argv with [`CommandSpec::from_argv`]. Commands are strict by default: a
/// nonzero exit status becomes [`RunError::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program name, resolved through `PATH` when it has no separator.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory; the parent's current directory when `None`.
    pub cwd: Option<PathBuf>,
    /// Environment overrides layered on top of the inherited environment.
    pub env: BTreeMap<String, String>,
    /// Whether a nonzero exit status is an error.
    pub strict: bool,
    /// Time budget after which the child is killed.
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    /// Creates a strict spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            strict: true,
            timeout: None,
        }
    }

    /// Creates a spec from an argv sequence (program followed by its arguments).
    ///
    /// Returns `None` when the sequence is empty.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = argv.into_iter().map(Into::into);
        let program = iter.next()?;
        Some(Self::new(program).args(iter))
    }

    /// Appends a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Overrides one environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets strict mode.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets an optional time budget.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The full argv: program followed by arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone()).chain(self.args.iter().cloned()).collect()
    }

    /// Human-readable command line, used in logs and messages.
    pub fn display(&self) -> String {
        self.argv().join(" ")
    }
}

/// The outcome of one finished process.
///
/// Output streams are decoded lossily as UTF-8 with trailing `\n`/`\r`
/// characters removed; nothing else is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// The argv that was executed.
    pub argv: Vec<String>,
    /// Exit status, or `-1` when the process was terminated by a signal.
    pub exit_status: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Wall-clock time between spawn and exit.
    pub elapsed: Option<Duration>,
}

impl CommandResult {
    /// Returns `true` when the process exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }

    /// Human-readable command line.
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

/// Strips the trailing line terminators from captured output.
pub fn normalize_output(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end_matches(['\n', '\r']).to_string()
}

/// Executes external commands.
///
/// Implementors provide [`execute`](CommandRunner::execute), which reports
/// spawn problems and timeouts but never judges the exit status. Callers use
/// [`run`](CommandRunner::run), which applies strict mode on top so every
/// adapter treats a nonzero exit the same way.
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion and returns its raw outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NotFound`] when the program cannot be located,
    /// [`RunError::Timeout`] when the time budget is exceeded, and
    /// [`RunError::Spawn`] for other I/O failures.
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError>;

    /// Runs the command, failing on a nonzero exit status in strict mode.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](CommandRunner::execute) returns, plus
    /// [`RunError::Failure`] carrying the result when `spec.strict` is set and
    /// the process exited nonzero.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        let result = self.execute(spec)?;
        if spec.strict && !result.success() {
            return Err(RunError::Failure(Box::new(result)));
        }
        Ok(result)
    }
}
