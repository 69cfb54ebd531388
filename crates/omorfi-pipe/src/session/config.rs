//! Launch configuration for the omorfi child process.

use std::path::PathBuf;
use std::process::Command;

use omorfi_config::Config;

use crate::AdapterMode;

/// How to start the external analyser or generator.
///
/// The command line is handed to `shell -c`, so it may chain commands or rely
/// on `PATH` lookup exactly like an interactive invocation would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildCommand {
    /// The shell used to interpret `command_line`.
    pub shell: PathBuf,
    /// The command line starting the omorfi tool.
    pub command_line: String,
    /// Working directory for the spawned process.
    pub working_dir: Option<PathBuf>,
}

impl ChildCommand {
    /// Creates a command run through the configured shell.
    #[must_use]
    pub fn new(shell: impl Into<PathBuf>, command_line: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            command_line: command_line.into(),
            working_dir: None,
        }
    }

    /// Builds the command for `mode` from the shared configuration.
    #[must_use]
    pub fn from_config(config: &Config, mode: AdapterMode) -> Self {
        let command_line = match mode {
            AdapterMode::Analyse => config.analyse_command(),
            AdapterMode::Generate => config.generate_command(),
        };
        let command = Self::new(config.shell(), command_line);
        match config.working_dir() {
            Some(dir) => command.with_working_dir(dir.as_std_path()),
            None => command,
        }
    }

    /// Returns the default command for `mode`.
    ///
    /// Expects the omorfi shell scripts to be available in `PATH`.
    #[must_use]
    pub fn for_mode(mode: AdapterMode) -> Self {
        Self::from_config(&Config::default(), mode)
    }

    /// Sets a custom working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Builds the process command without configuring stdio.
    pub(super) fn to_command(&self) -> Command {
        let mut command = Command::new(&self.shell);
        command.arg("-c").arg(&self.command_line);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}
