//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::adapters::live::LiveCommandRunner;
use crate::error::{Error, Result};
use crate::ports::runner::{CommandRunner, CommandSpec};

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to a separate cassette file.
/// All cassettes are stored in a timestamped directory.
pub struct RecordingSession {
    /// Recorder for runner interactions.
    pub runner: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for clock interactions.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing all cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session under `base_dir/<timestamp>/`.
    ///
    /// `workdir` is the repository being operated on; its HEAD commit is
    /// stamped into every cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cassette directory already exists
    /// - The directory cannot be created
    pub fn new(base_dir: &Path, workdir: &Path) -> Result<Self> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base_dir.join(&timestamp);

        if output_dir.exists() {
            return Err(Error::Cassette(format!(
                "cassette directory already exists: {}",
                output_dir.display()
            )));
        }

        std::fs::create_dir_all(&output_dir).map_err(|e| {
            Error::Cassette(format!("failed to create cassette directory: {e}"))
        })?;

        let commit = commit_hash(workdir);

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, &name, &commit)))
        };

        Ok(Self { runner: make_recorder("runner"), clock: make_recorder("clock"), output_dir })
    }

    /// Directory the cassettes are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// Consumes the session and writes each port's cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if any cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<()> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| {
                    Error::Cassette(format!("recording adapter for {port} still has references"))
                })?
                .into_inner()
                .map_err(|e| Error::Cassette(format!("recorder lock for {port} poisoned: {e}")))?;
            let path = recorder.finish()?;
            tracing::debug!(port, path = %path.display(), "cassette written");
            Ok(())
        }

        finish_one(self.runner, "runner")?;
        finish_one(self.clock, "clock")?;

        Ok(self.output_dir)
    }
}

/// HEAD of `workdir`, or "unknown" with a warning if unavailable.
fn commit_hash(workdir: &Path) -> String {
    let spec = CommandSpec::new("git").args(["rev-parse", "HEAD"]).cwd(workdir);
    match LiveCommandRunner.run(&spec) {
        Ok(result) => result.stdout,
        Err(err) => {
            tracing::warn!(%err, "could not read git commit hash, using 'unknown'");
            "unknown".to_string()
        }
    }
}
