//! Shared configuration for the omorfi pipeline adapters.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a TOML
//! configuration file (`--config-path` or `OMORFI_CONFIG_PATH`), then
//! `OMORFI_*` environment variables, and finally command-line flags.
//!
//! The external analyser and generator are described here as shell command
//! lines plus an optional working directory so that deployments can point the
//! adapters at any omorfi checkout without rebuilding.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_ANALYSE_COMMAND, DEFAULT_GENERATE_COMMAND, DEFAULT_LOG_FILTER, DEFAULT_SHELL,
    default_analyse_command, default_generate_command, default_log_filter,
    default_log_filter_string, default_log_format, default_shell,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for the adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OMORFI")]
pub struct Config {
    /// Shell command line that starts the analyser.
    #[serde(default = "defaults::default_analyse_command")]
    #[ortho_config(default = defaults::default_analyse_command())]
    analyse_command: String,
    /// Shell command line that starts the generator.
    #[serde(default = "defaults::default_generate_command")]
    #[ortho_config(default = defaults::default_generate_command())]
    generate_command: String,
    /// Shell used to interpret the command lines.
    #[serde(default = "defaults::default_shell")]
    #[ortho_config(default = defaults::default_shell())]
    shell: String,
    /// Directory the child process is started in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    working_dir: Option<Utf8PathBuf>,
    /// Tracing filter expression.
    #[serde(default = "defaults::default_log_filter_string")]
    #[ortho_config(default = defaults::default_log_filter_string())]
    log_filter: String,
    /// Log output format.
    #[serde(default = "defaults::default_log_format")]
    #[ortho_config(default = defaults::default_log_format())]
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyse_command: default_analyse_command(),
            generate_command: default_generate_command(),
            shell: default_shell(),
            working_dir: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Command line that starts the analyser.
    #[must_use]
    pub fn analyse_command(&self) -> &str {
        &self.analyse_command
    }

    /// Command line that starts the generator.
    #[must_use]
    pub fn generate_command(&self) -> &str {
        &self.generate_command
    }

    /// Shell used to run either command line.
    #[must_use]
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Working directory for the child process, if configured.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Utf8Path> {
        self.working_dir.as_deref()
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Replaces the analyser command line.
    #[must_use]
    pub fn with_analyse_command(mut self, command: impl Into<String>) -> Self {
        self.analyse_command = command.into();
        self
    }

    /// Replaces the generator command line.
    #[must_use]
    pub fn with_generate_command(mut self, command: impl Into<String>) -> Self {
        self.generate_command = command.into();
        self
    }

    /// Sets the working directory for the child process.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}
