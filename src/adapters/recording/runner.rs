//! Recording adapter for the `CommandRunner` port.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::cassette::format::RecordedRun;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::RunError;
use crate::ports::runner::{CommandResult, CommandRunner, CommandSpec};

/// Records runner interactions while delegating to an inner implementation.
pub struct RecordingCommandRunner {
    inner: Box<dyn CommandRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCommandRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn CommandRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        let result = self.inner.execute(spec);
        record_interaction(
            &self.recorder,
            "runner",
            "execute",
            spec,
            &RecordedRun::from_result(&result),
        );
        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::adapters::live::runner::LiveCommandRunner;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_execute_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("runner.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "abc")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let runner =
                RecordingCommandRunner::new(Box::new(LiveCommandRunner), Arc::clone(&recorder));
            let result = runner.run(&CommandSpec::new("echo").arg("hello"));
            assert!(result.is_ok());
            let missing = runner.run(&CommandSpec::new("initgit-missing-binary"));
            assert!(matches!(missing, Err(RunError::NotFound { .. })));
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].port, "runner");
        assert_eq!(cassette.interactions[0].method, "execute");
        assert_eq!(cassette.interactions[0].input["program"], "echo");
        assert_eq!(cassette.interactions[0].output["ok"]["stdout"], "hello");
        assert_eq!(
            cassette.interactions[1].output["not_found"]["program"],
            "initgit-missing-binary"
        );
    }
}
