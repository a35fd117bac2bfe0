//! Replaying adapter for the `CommandRunner` port.

use std::sync::Mutex;

use crate::cassette::format::{Interaction, RecordedRun};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RunError;
use crate::ports::runner::{CommandResult, CommandRunner, CommandSpec};

/// Replays recorded command outcomes from a cassette.
///
/// Each call must ask for the same argv that was recorded at that position;
/// a divergence means the code under replay no longer issues the commands
/// the cassette captured.
pub struct ReplayingCommandRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCommandRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl CommandRunner for ReplayingCommandRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        let Interaction { seq, input, output, .. } = self
            .replayer
            .lock()
            .expect("replayer lock poisoned")
            .next_interaction("runner", "execute");

        let recorded: CommandSpec = serde_json::from_value(input)
            .unwrap_or_else(|e| panic!("runner::execute seq={seq}: bad recorded input: {e}"));
        assert!(
            recorded.argv() == spec.argv(),
            "Cassette mismatch at seq={seq}: recorded `{}`, requested `{}`",
            recorded.display(),
            spec.display(),
        );

        let outcome: RecordedRun = serde_json::from_value(output)
            .unwrap_or_else(|e| panic!("runner::execute seq={seq}: bad recorded output: {e}"));
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    fn recorded(seq: u64, spec: &CommandSpec, outcome: &RecordedRun) -> Interaction {
        Interaction {
            seq,
            port: "runner".into(),
            method: "execute".into(),
            input: serde_json::to_value(spec).unwrap(),
            output: serde_json::to_value(outcome).unwrap(),
        }
    }

    fn completed(argv: &[&str], exit_status: i32, stdout: &str) -> RecordedRun {
        RecordedRun::Ok(CommandResult {
            argv: argv.iter().map(ToString::to_string).collect(),
            exit_status,
            stdout: stdout.into(),
            stderr: String::new(),
            elapsed: None,
        })
    }

    #[test]
    fn replays_completed_run() {
        let spec = CommandSpec::new("git").arg("status");
        let runner = ReplayingCommandRunner::new(make_replayer(vec![recorded(
            0,
            &spec,
            &completed(&["git", "status"], 0, "On branch master"),
        )]));

        let result = runner.run(&spec).unwrap();
        assert_eq!(result.stdout, "On branch master");
    }

    #[test]
    fn strict_mode_applies_to_replayed_results() {
        let spec = CommandSpec::new("git").arg("push");
        let runner = ReplayingCommandRunner::new(make_replayer(vec![recorded(
            0,
            &spec,
            &completed(&["git", "push"], 128, ""),
        )]));

        let err = runner.run(&spec).unwrap_err();
        assert!(matches!(err, RunError::Failure(ref r) if r.exit_status == 128));
    }

    #[test]
    fn replays_not_found() {
        let spec = CommandSpec::new("gh").args(["repo", "create"]);
        let runner = ReplayingCommandRunner::new(make_replayer(vec![recorded(
            0,
            &spec,
            &RecordedRun::NotFound { program: "gh".into() },
        )]));

        assert!(matches!(runner.run(&spec), Err(RunError::NotFound { .. })));
    }

    #[test]
    fn replays_hand_written_output() {
        let runner = ReplayingCommandRunner::new(make_replayer(vec![Interaction {
            seq: 0,
            port: "runner".into(),
            method: "execute".into(),
            input: json!({"program": "echo", "args": ["hi"], "cwd": null, "env": {}, "strict": true, "timeout": null}),
            output: json!({"ok": {"argv": ["echo", "hi"], "exit_status": 0, "stdout": "hi", "stderr": "", "elapsed": null}}),
        }]));

        let result = runner.run(&CommandSpec::new("echo").arg("hi")).unwrap();
        assert_eq!(result.stdout, "hi");
    }

    #[test]
    #[should_panic(expected = "Cassette mismatch")]
    fn diverging_command_panics() {
        let spec = CommandSpec::new("git").arg("status");
        let runner = ReplayingCommandRunner::new(make_replayer(vec![recorded(
            0,
            &spec,
            &completed(&["git", "status"], 0, ""),
        )]));

        let _ = runner.run(&CommandSpec::new("git").arg("diff"));
    }
}
