//! Core library entry for the `tasklink` CLI.
//!
//! `tasklink` keeps a planning task file and a Beads issue tracker in step:
//! [`model`] normalizes both stores into one task shape, [`links`] records
//! which tasks are the same work, and [`sync`] reconciles their statuses.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod links;
pub mod logging;
pub mod model;
pub mod ports;
pub mod sync;

#[cfg(test)]
mod testing;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// Loads `.env` if present and installs the log subscriber before
/// dispatching.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    let dotenv = dotenvy::dotenv();
    let verbose = matches!(&cli.command, cli::Command::Sync(args) if args.verbose);
    logging::init(verbose);
    if let Some(err) = dotenv_problem(&dotenv) {
        tracing::warn!(error = %err, "ignoring unreadable .env file");
    }
    commands::dispatch(&cli.command)
}

/// The `.env` load error worth reporting. A missing file is not one.
fn dotenv_problem<T>(result: &Result<T, dotenvy::Error>) -> Option<&dotenvy::Error> {
    result.as_ref().err().filter(|err| !err.not_found())
}
