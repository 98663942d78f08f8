//! Participant dataset converter.
//!
//! Turns `participants.txt` in the working directory into `dataset.xml`.
//! This binary delegates to `participant_dataset::cli` for parsing and the
//! run itself, keeping the behaviour testable without spawning a process.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use participant_dataset::cli::{CliError, ParseOutcome, execute, parse_args, success_message};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help => {
            print_usage(io::stdout().lock());
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let summary = execute(&options, &mut rand::rng())?;
            let message = success_message(&summary, options.dir());
            write_success(&message);
            Ok(())
        }
    }
}

fn init_tracing() {
    // Diagnostics go to stderr so stdout only carries the result line.
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        drop(err);
    }
}

fn print_usage(mut out: impl Write) {
    let usage = concat!(
        "Usage: participant-dataset [options]\n",
        "\n",
        "Converts participants.txt into dataset.xml, removing participants.txt\n",
        "and the intermediate hashes.txt on success.\n",
        "\n",
        "Options:\n",
        "  --dir <path>    Directory holding participants.txt (defaults to .)\n",
        "  -h, --help      Print this help output\n",
    );
    if let Err(err) = out.write_all(usage.as_bytes()) {
        drop(err);
    }
}

fn write_success(message: &str) {
    if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
        drop(err);
    }
}
