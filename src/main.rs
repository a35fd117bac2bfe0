//! Binary entrypoint for the `initgit` CLI.

use std::process::ExitCode;

use colored::Colorize;

fn main() -> ExitCode {
    // Settings may come from a .env file in the working directory.
    dotenvy::dotenv().ok();

    // Recording is handled in commands::dispatch via INITGIT_RECORD=<dir>.
    match initgit::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::from(err.exit_code())
        }
    }
}
