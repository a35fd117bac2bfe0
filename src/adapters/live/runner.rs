//! Live command runner using `std::process::Command`.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::RunError;
use crate::ports::runner::{normalize_output, CommandResult, CommandRunner, CommandSpec};

/// How often a child with a deadline is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Live runner that spawns real processes.
///
/// Standard input is closed, standard output and error are drained on two
/// reader threads so a child writing a lot of output never blocks on a full
/// pipe. The time budget covers both the child and the draining of its
/// pipes, so a grandchild that keeps a pipe open cannot stretch the call
/// past its timeout. On timeout the child is killed and reaped; any output
/// it produced is discarded.
pub struct LiveCommandRunner;

impl CommandRunner for LiveCommandRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult, RunError> {
        let command_line = spec.display();
        tracing::debug!(command = %command_line, cwd = ?spec.cwd, "spawning command");

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &spec.cwd {
            // A missing cwd also surfaces as NotFound from spawn; keep it apart
            // from a missing program.
            if !dir.is_dir() {
                let source = io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("working directory {} does not exist", dir.display()),
                );
                return Err(RunError::Spawn { command: command_line, source });
            }
            command.current_dir(dir);
        }

        let started = Instant::now();
        let child = command.spawn().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                RunError::NotFound { program: spec.program.clone() }
            } else {
                RunError::Spawn { command: command_line.clone(), source }
            }
        })?;

        let mut guard = ChildGuard::new(child);
        let (tx, rx) = mpsc::channel();
        let pending = drain(guard.child.stdout.take(), Stream::Stdout, &tx)
            + drain(guard.child.stderr.take(), Stream::Stderr, &tx);
        drop(tx);

        let deadline = spec.timeout.and_then(|limit| started.checked_add(limit));
        let waited = match deadline {
            Some(deadline) => guard.wait_until(deadline),
            None => guard.wait().map(Some),
        };
        let timed_out = |pid: u32| {
            let timeout = spec.timeout.unwrap_or_default();
            tracing::warn!(command = %command_line, ?timeout, pid, "command timed out");
            RunError::Timeout { command: command_line.clone(), timeout, pid }
        };
        let status = match waited {
            Ok(Some(status)) => status,
            Ok(None) => return Err(timed_out(guard.kill())),
            Err(source) => return Err(RunError::Spawn { command: command_line.clone(), source }),
        };

        // The child is gone, but a grandchild may still hold its pipes.
        let (stdout, stderr) = match collect(&rx, pending, deadline) {
            Ok(Some(output)) => output,
            Ok(None) => return Err(timed_out(guard.child.id())),
            Err(source) => return Err(RunError::Spawn { command: command_line.clone(), source }),
        };

        let result = CommandResult {
            argv: spec.argv(),
            exit_status: exit_status(status),
            stdout: normalize_output(&stdout),
            stderr: normalize_output(&stderr),
            elapsed: Some(started.elapsed()),
        };
        tracing::debug!(
            command = %command_line,
            exit_status = result.exit_status,
            elapsed = ?result.elapsed,
            "command finished"
        );
        Ok(result)
    }
}

/// Owns a spawned child and guarantees it is reaped.
///
/// If the runner returns before the child has been waited on, dropping the
/// guard kills the child and waits for it.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child, reaped: false }
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }

    /// Polls until the child exits or `deadline` passes. `None` means the
    /// deadline passed with the child still running.
    fn wait_until(&mut self, deadline: Instant) -> io::Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                self.reaped = true;
                return Ok(Some(status));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }

    /// Kills and reaps the child, returning its pid.
    fn kill(&mut self) -> u32 {
        let pid = self.child.id();
        if let Err(err) = self.child.kill() {
            tracing::debug!(pid, %err, "kill failed, child already exited");
        }
        if let Err(err) = self.child.wait() {
            tracing::debug!(pid, %err, "failed to reap child");
        }
        self.reaped = true;
        pid
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            self.kill();
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

type Chunk = (Stream, io::Result<Vec<u8>>);

/// Reads a pipe to the end on its own thread and sends the bytes on `tx`.
///
/// Returns how many chunks to expect: 1 when a pipe was present.
fn drain<R>(pipe: Option<R>, stream: Stream, tx: &Sender<Chunk>) -> usize
where
    R: Read + Send + 'static,
{
    let Some(mut pipe) = pipe else {
        return 0;
    };
    let tx = tx.clone();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let read = pipe.read_to_end(&mut buf).map(|_| buf);
        // The receiver is gone after a timeout; nothing is waiting.
        let _ = tx.send((stream, read));
    });
    1
}

/// Waits for `pending` chunks, giving up at `deadline`.
///
/// `Ok(None)` means the deadline passed first. A read error, or a reader
/// that died without reporting, is an error rather than empty output.
fn collect(
    rx: &Receiver<Chunk>,
    pending: usize,
    deadline: Option<Instant>,
) -> io::Result<Option<(Vec<u8>, Vec<u8>)>> {
    let lost = || io::Error::other("output reader stopped before reporting");
    let (mut stdout, mut stderr) = (Vec::new(), Vec::new());
    for _ in 0..pending {
        let (stream, read) = match deadline {
            Some(deadline) => {
                match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(chunk) => chunk,
                    Err(RecvTimeoutError::Timeout) => return Ok(None),
                    Err(RecvTimeoutError::Disconnected) => return Err(lost()),
                }
            }
            None => rx.recv().map_err(|_| lost())?,
        };
        match stream {
            Stream::Stdout => stdout = read?,
            Stream::Stderr => stderr = read?,
        }
    }
    Ok(Some((stdout, stderr)))
}

fn exit_status(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
