//! Test doubles shared by unit tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::adapters::live::LiveFileSystem;
use crate::commands::Invocation;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::RunError;
use crate::ports::clock::Clock;
use crate::ports::runner::{CommandResult, CommandRunner, CommandSpec};

enum Reply {
    Exit { status: i32, stdout: String },
    NotFound,
}

struct Rule {
    prefix: Vec<String>,
    reply: Reply,
}

/// Runner that records every spec and answers from a rule list.
///
/// The first rule whose argv prefix matches wins; unmatched commands exit 0
/// with empty output.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn exit_with(mut self, prefix: &[&str], status: i32, stdout: &str) -> Self {
        self.rules.push(Rule {
            prefix: prefix.iter().map(ToString::to_string).collect(),
            reply: Reply::Exit { status, stdout: stdout.to_string() },
        });
        self
    }

    pub(crate) fn not_found(mut self, program: &str) -> Self {
        self.rules.push(Rule { prefix: vec![program.to_string()], reply: Reply::NotFound });
        self
    }

    pub(crate) fn specs(&self) -> Vec<CommandSpec> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Every argv seen so far, joined with spaces.
    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.specs().iter().map(CommandSpec::display).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        self.calls.lock().expect("calls lock poisoned").push(spec.clone());
        let argv = spec.argv();
        let rule = self.rules.iter().find(|rule| argv.starts_with(&rule.prefix));
        let (status, stdout) = match rule.map(|r| &r.reply) {
            Some(Reply::NotFound) => {
                return Err(RunError::NotFound { program: spec.program.clone() })
            }
            Some(Reply::Exit { status, stdout }) => (*status, stdout.clone()),
            None => (0, String::new()),
        };
        Ok(CommandResult { argv, exit_status: status, stdout, stderr: String::new(), elapsed: None })
    }
}

impl CommandRunner for Arc<ScriptedRunner> {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        self.as_ref().execute(spec)
    }
}

/// Clock frozen at 2025-03-04 05:06:07 UTC.
pub(crate) struct FixedClock;

impl FixedClock {
    pub(crate) fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

/// Context with a shared scripted runner, a frozen clock and the real
/// filesystem.
pub(crate) fn context(runner: &Arc<ScriptedRunner>) -> ServiceContext {
    ServiceContext {
        clock: Box::new(FixedClock),
        fs: Box::new(LiveFileSystem),
        runner: Box::new(Arc::clone(runner)),
    }
}

pub(crate) fn invocation<'a>(
    ctx: &'a ServiceContext,
    settings: &'a Settings,
    dir: &Path,
) -> Invocation<'a> {
    Invocation::new(ctx, settings, dir.to_path_buf())
}
