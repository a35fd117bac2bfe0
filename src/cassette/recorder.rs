//! Accumulates interactions for one cassette file.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::format::{Cassette, Interaction};
use crate::error::{Error, Result};

/// Collects port interactions in call order and writes them out as YAML.
///
/// The cassette is stamped with the time the recorder was created, which is
/// when the recording session started.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Starts an empty cassette destined for `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Appends an interaction, numbering it after the previous one.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Number of interactions recorded so far.
    pub fn len(&self) -> usize {
        self.cassette.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.cassette.interactions.is_empty()
    }

    /// When the recording started.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.cassette.recorded_at
    }

    /// Writes the cassette and returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if serialization or the write fails.
    pub fn finish(self) -> Result<PathBuf> {
        let yaml = serde_yaml::to_string(&self.cassette)
            .map_err(|e| Error::Cassette(format!("failed to serialize cassette: {e}")))?;
        std::fs::write(&self.path, yaml).map_err(|e| {
            Error::Cassette(format!("failed to write {}: {e}", self.path.display()))
        })?;
        Ok(self.path)
    }
}
