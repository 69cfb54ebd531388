//! CLI argument definitions for the omorfi pipeline adapters.

use clap::{Parser, Subcommand, ValueEnum};
use omorfi_pipe::{AdapterMode, OutputFormat};

const CONFIG_HELP: &str = "\
Configuration flags (must precede the subcommand):
  --config-path <PATH>        TOML configuration file
  --analyse-command <CMD>     shell command line starting the analyser
  --generate-command <CMD>    shell command line starting the generator
  --shell <PATH>              shell interpreting the command lines
  --working-dir <DIR>         directory the omorfi process starts in
  --log-filter <FILTER>       tracing filter, e.g. debug
  --log-format <FORMAT>       json or compact

Each flag can also be set through OMORFI_* environment variables.";

/// Output layout selection for the analyser.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum FormatArg {
    /// One line per analysis: the analysis or `UNK`.
    #[default]
    Plain,
    /// One tab-separated line per token and a blank line per input line.
    MorphText,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Plain => Self::Plain,
            FormatArg::MorphText => Self::MorphText,
        }
    }
}

/// Command-line interface for the omorfi pipeline adapters.
#[derive(Parser, Debug)]
#[command(
    name = "omorfi-pipe",
    version,
    about = "Pipe stdin through omorfi and print one result per word",
    after_help = CONFIG_HELP,
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// The adapter to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Adapter subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Analyses every whitespace-separated token read from stdin.
    Analyse {
        /// Controls how analyses are printed.
        #[arg(long, value_enum, default_value_t = FormatArg::Plain)]
        format: FormatArg,
    },
    /// Generates surface forms for analyses read from stdin, one per line.
    Generate,
}

impl CliCommand {
    /// The adapter mode selected by the subcommand.
    pub(crate) const fn mode(self) -> AdapterMode {
        match self {
            Self::Analyse { .. } => AdapterMode::Analyse,
            Self::Generate => AdapterMode::Generate,
        }
    }

    /// The output format selected by the subcommand.
    pub(crate) fn format(self) -> OutputFormat {
        match self {
            Self::Analyse { format } => format.into(),
            Self::Generate => OutputFormat::Plain,
        }
    }
}
