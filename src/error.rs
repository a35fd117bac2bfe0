//! Error types for command execution and the CLI.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::ports::runner::CommandResult;

/// Errors produced while running an external command.
#[derive(Debug, Error)]
pub enum RunError {
    /// The executable could not be located.
    #[error("command not found: `{program}`")]
    NotFound {
        /// Program that was requested.
        program: String,
    },

    /// The process exited nonzero under strict mode.
    #[error("command `{}` failed with exit code {}", .0.command_line(), .0.exit_status)]
    Failure(Box<CommandResult>),

    /// The process outlived its time budget and was killed.
    #[error("command `{command}` timed out after {timeout:?}")]
    Timeout {
        /// Command line that was running.
        command: String,
        /// Budget that was exceeded.
        timeout: Duration,
        /// Process id of the killed child.
        pid: u32,
    },

    /// Spawning or waiting on the process failed for another reason.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl RunError {
    /// The captured result, when the process ran to completion.
    pub fn result(&self) -> Option<&CommandResult> {
        match self {
            Self::Failure(result) => Some(result),
            _ => None,
        }
    }
}

/// Top-level error for `initgit` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An external command failed.
    #[error(transparent)]
    Run(#[from] RunError),

    /// A file could not be read or written.
    #[error("{}: {message}", path.display())]
    File {
        /// File involved.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Cassette recording or replay failed.
    #[error("cassette error: {0}")]
    Cassette(String),

    /// The request cannot be carried out as given.
    #[error("{0}")]
    Usage(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// A failed child passes its own status through; a missing program maps
    /// to 127 and a timeout to 124, following shell conventions.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Run(RunError::Failure(result)) => {
                u8::try_from(result.exit_status.clamp(1, 255)).unwrap_or(1)
            }
            Self::Run(RunError::NotFound { .. }) => 127,
            Self::Run(RunError::Timeout { .. }) => 124,
            Self::Usage(_) => 2,
            _ => 1,
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::File { path: path.into(), message: err.to_string() }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
