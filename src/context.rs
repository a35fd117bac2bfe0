//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveClock, LiveCommandRunner, LiveFileSystem};
use crate::adapters::recording::{RecordingClock, RecordingCommandRunner};
use crate::adapters::replaying::{ReplayingClock, ReplayingCommandRunner};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::error::{Result, RunError};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::runner::{CommandResult, CommandRunner, CommandSpec};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
/// The filesystem is always live: scaffolding writes real files even when
/// commands and time are replayed.
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Runner for external commands.
    pub runner: Box<dyn CommandRunner>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            runner: Box::new(LiveCommandRunner),
        }
    }

    /// Creates a recording context plus the session that owns its cassettes.
    ///
    /// Live adapters do the actual work; runner and clock interactions are
    /// captured under `base_dir/<timestamp>/`. Drop the context before
    /// calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(base_dir: &Path, workdir: &Path) -> Result<(Self, RecordingSession)> {
        let session = RecordingSession::new(base_dir, workdir)?;
        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            fs: Box::new(LiveFileSystem),
            runner: Box::new(RecordingCommandRunner::new(
                Box::new(LiveCommandRunner),
                Arc::clone(&session.runner),
            )),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Runner and clock are both served from the one cassette; each gets
    /// its own replayer so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let cassette = CassetteConfig::load_cassette(path)?;
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(LiveFileSystem),
            runner: Box::new(ReplayingCommandRunner::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file will use a panicking adapter
    /// that fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: Box::new(LiveFileSystem),
            runner: match replayers.runner {
                Some(r) => Box::new(ReplayingCommandRunner::new(r)),
                None => Box::new(PanickingCommandRunner),
            },
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingCommandRunner;
impl CommandRunner for PanickingCommandRunner {
    fn execute(&self, spec: &CommandSpec) -> std::result::Result<CommandResult, RunError> {
        panic!(
            "CommandRunner port not configured in CassetteConfig: no cassette loaded for runner \
             (requested `{}`)",
            spec.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction, RecordedRun};
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).unwrap();
        std::fs::write(path, yaml).unwrap();
    }

    fn git_status_interaction(seq: u64) -> Interaction {
        let spec = CommandSpec::new("git").arg("status");
        let outcome = RecordedRun::Ok(CommandResult {
            argv: spec.argv(),
            exit_status: 0,
            stdout: "nothing to commit, working tree clean".into(),
            stderr: String::new(),
            elapsed: None,
        });
        Interaction {
            seq,
            port: "runner".into(),
            method: "execute".into(),
            input: serde_json::to_value(&spec).unwrap(),
            output: serde_json::to_value(&outcome).unwrap(),
        }
    }

    #[test]
    fn replaying_context_from_monolithic_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.cassette.yaml");

        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!(null),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                git_status_interaction(1),
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        let result = ctx.runner.run(&CommandSpec::new("git").arg("status")).unwrap();
        assert_eq!(result.stdout, "nothing to commit, working tree clean");
    }

    #[test]
    fn replaying_from_per_port_cassettes() {
        let dir = tempfile::tempdir().unwrap();
        let runner_path = dir.path().join("runner.cassette.yaml");
        write_cassette(&runner_path, vec![git_status_interaction(0)]);

        let config = CassetteConfig { runner: Some(runner_path), ..CassetteConfig::default() };
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        let result = ctx.runner.run(&CommandSpec::new("git").arg("status")).unwrap();
        assert!(result.success());
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let config = CassetteConfig::panic_on_unspecified();
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        let _ = ctx.runner.run(&CommandSpec::new("git").arg("status"));
    }

    #[cfg(unix)]
    #[test]
    fn recording_context_writes_cassettes_that_replay() {
        let base = tempfile::tempdir().unwrap();
        let (ctx, session) = ServiceContext::recording_at(base.path(), base.path()).unwrap();
        let recorded = ctx.runner.run(&CommandSpec::new("echo").arg("recorded")).unwrap();
        let _ = ctx.clock.now();
        drop(ctx);
        let dir = session.finish().unwrap();

        let replay = ServiceContext::replaying_from(&CassetteConfig::from_dir(&dir)).unwrap();
        let replayed = replay.runner.run(&CommandSpec::new("echo").arg("recorded")).unwrap();
        assert_eq!(replayed, recorded);
    }
}
