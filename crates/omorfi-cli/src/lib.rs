//! Command-line runtime for the omorfi pipeline adapters.
//!
//! The module owns argument parsing, configuration bootstrapping, logging
//! set-up and the lifetime of the omorfi process. It is exercised both from
//! the binary entrypoint and from tests where configuration loading and the
//! IO streams can be substituted.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use omorfi_pipe::{ChildCommand, ProcessSession, run_adapter};
use tracing::debug;

mod cli;
mod config;
mod errors;
mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, prepare_cli_arguments, split_config_arguments};
use errors::AppError;

/// Log target for CLI operations.
const CLI_TARGET: &str = "omorfi_cli";

/// Runs the CLI using the provided arguments and IO handles.
///
/// Returns [`ExitCode::FAILURE`] after writing the error to `stderr` when
/// configuration, the omorfi process, or the pipeline itself fails.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdin, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    match execute(args, stdin, stdout, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::CliUsage(error)) if !error.use_stderr() => {
            // `--help` and `--version` are successful invocations.
            let _ = write!(stdout, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<I, R, W, L>(args: I, stdin: R, stdout: &mut W, loader: &L) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    L: ConfigLoader,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&arguments);
    let cli = Cli::try_parse_from(prepare_cli_arguments(&arguments, &split))
        .map_err(AppError::CliUsage)?;
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    let mode = cli.command.mode();
    let format = cli.command.format();
    let command = ChildCommand::from_config(&config, mode);
    let mut session = ProcessSession::start(command).map_err(AppError::StartSession)?;

    let result = run_adapter(mode, format, &mut session, stdin, stdout);
    let status = session.stop();
    debug!(target: CLI_TARGET, mode = %mode, status = ?status, "omorfi session closed");

    result.map(|_| ()).map_err(AppError::from)
}

#[cfg(test)]
mod tests;
