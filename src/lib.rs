//! Core library entry for the `initgit` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod github;
pub mod ports;
pub mod scaffold;

#[cfg(test)]
mod test_support;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use error::{Error, Result};

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print and return `Ok`.
///
/// # Errors
///
/// Returns [`Error::Usage`] when argument parsing fails, or the handler's
/// error when command execution fails.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => {
            let message = err.to_string();
            return Err(Error::Usage(message.trim_start_matches("error: ").trim_end().to_string()));
        }
    };
    init_tracing(cli.verbose);
    commands::dispatch(&cli)
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "initgit=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second call in the same process (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::{run, Error};

    #[test]
    fn run_prints_help() {
        assert!(run(["initgit", "--help"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let err = run(["initgit", "unknown"]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn run_rejects_missing_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let err = run([
            OsString::from("initgit"),
            "vars".into(),
            "--cwd".into(),
            missing.into_os_string(),
        ])
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
