//! Configuration loading helpers for the CLI.
//!
//! Configuration flags precede the subcommand and are routed to
//! `ortho_config`; everything from the first non-configuration token onwards
//! is parsed by `clap` as the subcommand and its options.

use std::ffi::{OsStr, OsString};

use omorfi_config::Config;
use ortho_config::OrthoConfig;

use crate::errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Must stay in sync with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--analyse-command",
    "--generate-command",
    "--shell",
    "--working-dir",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// `args` holds the program name followed by the configuration flags
    /// only; subcommand arguments have already been split off.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let argument_text = argument.to_string_lossy();
    if !argument_text.starts_with("--") {
        return FlagAction::Skip;
    }

    let (flag, has_inline_value) = match argument_text.split_once('=') {
        Some((name, _)) => (name, true),
        None => (argument_text.as_ref(), false),
    };

    if CONFIG_CLI_FLAGS.contains(&flag) {
        return FlagAction::Include {
            needs_value: !has_inline_value,
        };
    }

    FlagAction::Skip
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut config_arguments: Vec<OsString> = Vec::new();
    let mut remaining = args.iter();
    let Some(program) = remaining.next() else {
        return ConfigArgumentSplit {
            config_arguments,
            command_start: 0,
        };
    };
    config_arguments.push(program.clone());

    let mut command_start = 1usize;
    while let Some(argument) = remaining.next() {
        match process_config_flag(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                command_start += 1;
                if needs_value && let Some(value) = remaining.next() {
                    config_arguments.push(value.clone());
                    command_start += 1;
                }
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_start,
    }
}

/// Builds the argument list handed to `clap`: the program name followed by
/// every token after the configuration flags.
pub(crate) fn prepare_cli_arguments(
    args: &[OsString],
    split: &ConfigArgumentSplit,
) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}
