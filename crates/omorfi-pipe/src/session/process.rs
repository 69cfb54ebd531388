//! Session owning a running omorfi process.

use std::io;
use std::process::{Child, ExitStatus, Stdio};

use tracing::{debug, info, warn};

use super::SESSION_TARGET;
use super::channel::{Exchange, RecordChannel};
use super::config::ChildCommand;
use super::error::SessionError;
use super::lifecycle::terminate_child;
use super::state::ProcessState;
use super::transport::ChildTransport;
use crate::record::Record;

/// An omorfi process together with the channel used to talk to it.
///
/// The process is spawned by [`ProcessSession::start`] and is terminated by
/// [`ProcessSession::stop`], by the first request that finds it gone, or
/// when the session is dropped, whichever happens first.
///
/// # Example
///
/// ```no_run
/// use omorfi_pipe::{ChildCommand, Exchange, ProcessSession};
///
/// # fn main() -> Result<(), omorfi_pipe::SessionError> {
/// let command = ChildCommand::new("/bin/sh", "omorfi-generate.sh");
/// let mut session = ProcessSession::start(command)?;
/// for record in session.send("kissa+N+Sg+Nom")? {
///     assert!(!record.output().is_empty());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProcessSession {
    command: ChildCommand,
    state: ProcessState,
}

impl ProcessSession {
    /// Spawns the child process described by `command`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::BinaryNotFound`] if the shell does not exist
    /// and [`SessionError::SpawnFailed`] for any other spawn failure.
    pub fn start(command: ChildCommand) -> Result<Self, SessionError> {
        let state = spawn_process(&command)?;
        Ok(Self { command, state })
    }

    /// Returns the command this session was started with.
    #[must_use]
    pub const fn command(&self) -> &ChildCommand {
        &self.command
    }

    /// Returns true while the child is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running { .. })
    }

    /// Returns the child's process id while it is running.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        match &self.state {
            ProcessState::Running { child, .. } => Some(child.id()),
            ProcessState::Stopped => None,
        }
    }

    /// Stops the child process.
    ///
    /// Closes the child's stdin so it can exit on end of input, waits a short
    /// grace period, and kills it if it is still running. Returns the exit
    /// status if one could be collected.
    pub fn stop(mut self) -> Option<ExitStatus> {
        let status = self.shut_down();
        info!(
            target: SESSION_TARGET,
            command = %self.command.command_line,
            status = ?status,
            "omorfi process stopped"
        );
        status
    }

    /// Moves to the stopped state, closing the streams and reaping the child.
    fn shut_down(&mut self) -> Option<ExitStatus> {
        match std::mem::replace(&mut self.state, ProcessState::Stopped) {
            ProcessState::Running { mut child, channel } => {
                drop(channel);
                terminate_child(&mut child)
            }
            ProcessState::Stopped => None,
        }
    }
}

impl Exchange for ProcessSession {
    fn send(&mut self, request: &str) -> Result<Vec<Record>, SessionError> {
        let ProcessState::Running { channel, .. } = &mut self.state else {
            return Err(SessionError::NotRunning);
        };

        match channel.send(request) {
            Err(SessionError::ChildTerminated {
                request: pending, ..
            }) => {
                let status = self.shut_down();
                warn!(
                    target: SESSION_TARGET,
                    request = %pending,
                    status = ?status,
                    "omorfi process terminated mid-request"
                );
                Err(SessionError::ChildTerminated {
                    request: pending,
                    status,
                })
            }
            result => result,
        }
    }
}

/// Spawns the child process with piped stdin and stdout.
fn spawn_process(command: &ChildCommand) -> Result<ProcessState, SessionError> {
    debug!(
        target: SESSION_TARGET,
        shell = %command.shell.display(),
        command = %command.command_line,
        working_dir = ?command.working_dir,
        "spawning omorfi process"
    );

    let mut process = command.to_command();
    process
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    let mut child = process.spawn().map_err(|error| spawn_error(command, error))?;

    let Some(stdin) = child.stdin.take() else {
        return Err(missing_pipe(child, "stdin"));
    };
    let Some(stdout) = child.stdout.take() else {
        return Err(missing_pipe(child, "stdout"));
    };

    info!(
        target: SESSION_TARGET,
        command = %command.command_line,
        pid = child.id(),
        "omorfi process spawned"
    );

    Ok(ProcessState::Running {
        child,
        channel: RecordChannel::new(ChildTransport::from_child(stdout, stdin)),
    })
}

/// Classifies a spawn failure.
///
/// `ENOENT` is reported for a missing working directory as well as for a
/// missing shell, so the directory is checked before blaming the shell.
fn spawn_error(command: &ChildCommand, error: io::Error) -> SessionError {
    if error.kind() != io::ErrorKind::NotFound {
        return SessionError::SpawnFailed {
            message: format!("failed to start {}", command.command_line),
            source: error,
        };
    }
    match command.working_dir.as_deref() {
        Some(dir) if !dir.is_dir() => SessionError::SpawnFailed {
            message: format!("working directory {} does not exist", dir.display()),
            source: error,
        },
        _ => SessionError::BinaryNotFound {
            command: command.shell.display().to_string(),
            source: error,
        },
    }
}

fn missing_pipe(mut child: Child, stream: &str) -> SessionError {
    let _status = terminate_child(&mut child);
    SessionError::SpawnFailed {
        message: format!("failed to capture {stream}"),
        source: io::Error::other(format!("no {stream}")),
    }
}

impl Drop for ProcessSession {
    fn drop(&mut self) {
        if let ProcessState::Running { mut child, channel } =
            std::mem::replace(&mut self.state, ProcessState::Stopped)
        {
            drop(channel);
            if let Err(error) = child.kill() {
                warn!(
                    target: SESSION_TARGET,
                    error = %error,
                    "failed to kill omorfi process on drop"
                );
            } else {
                let _status = child.wait();
            }
        }
    }
}

impl std::fmt::Debug for ProcessSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            ProcessState::Running { child, .. } => format!("running (pid: {})", child.id()),
            ProcessState::Stopped => String::from("stopped"),
        };

        f.debug_struct("ProcessSession")
            .field("command", &self.command.command_line)
            .field("state", &state)
            .finish()
    }
}
