//! Binary entrypoint for the `tasklink` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match tasklink::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
