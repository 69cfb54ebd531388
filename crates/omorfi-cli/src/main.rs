//! CLI entrypoint for the omorfi pipeline adapters.
//!
//! The binary delegates to [`omorfi_cli::run`], which loads configuration,
//! parses the subcommand, starts the omorfi process, and pipes stdin through
//! it until the first blank line.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin: StdinLock<'static> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    omorfi_cli::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
