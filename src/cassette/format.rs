//! Cassette data structures for recording and replaying interactions.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RunError;
use crate::ports::runner::CommandResult;

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (e.g. "runner", "clock").
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit hash of the working directory at recording time.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// Serialized outcome of one `runner::execute` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RecordedRun {
    /// The process ran to completion.
    Ok(CommandResult),
    /// The program could not be located.
    NotFound {
        /// Program that was requested.
        program: String,
    },
    /// The process was killed after its budget.
    Timeout {
        /// Command line that was running.
        command: String,
        /// Budget that was exceeded.
        timeout: Duration,
        /// Process id of the killed child.
        pid: u32,
    },
    /// Any other spawn failure, kept as text.
    Err {
        /// Command line that was attempted.
        command: String,
        /// Rendered error message.
        message: String,
    },
}

impl RecordedRun {
    /// Captures a runner outcome for recording.
    pub fn from_result(result: &Result<CommandResult, RunError>) -> Self {
        match result {
            Ok(result) => Self::Ok(result.clone()),
            Err(RunError::Failure(result)) => Self::Ok((**result).clone()),
            Err(RunError::NotFound { program }) => Self::NotFound { program: program.clone() },
            Err(RunError::Timeout { command, timeout, pid }) => {
                Self::Timeout { command: command.clone(), timeout: *timeout, pid: *pid }
            }
            Err(RunError::Spawn { command, source }) => {
                Self::Err { command: command.clone(), message: source.to_string() }
            }
        }
    }

    /// Rebuilds the runner outcome during replay.
    ///
    /// # Errors
    ///
    /// Returns the recorded error when the interaction did not complete.
    pub fn into_result(self) -> Result<CommandResult, RunError> {
        match self {
            Self::Ok(result) => Ok(result),
            Self::NotFound { program } => Err(RunError::NotFound { program }),
            Self::Timeout { command, timeout, pid } => {
                Err(RunError::Timeout { command, timeout, pid })
            }
            Self::Err { command, message } => {
                Err(RunError::Spawn { command, source: std::io::Error::other(message) })
            }
        }
    }
}
