//! Error types for omorfi process sessions.

use std::io;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::record::RecordError;

/// Errors raised while starting or talking to the child process.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The shell used to launch the child was not found.
    #[error("shell not found: {command}")]
    BinaryNotFound {
        /// The command that was not found.
        command: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to spawn the child process.
    #[error("failed to spawn omorfi process: {message}")]
    SpawnFailed {
        /// Description of the spawn failure.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The child closed its streams while a request was outstanding.
    #[error(
        "omorfi process terminated while handling {request:?} ({})",
        describe_status(.status.as_ref())
    )]
    ChildTerminated {
        /// The request being processed.
        request: String,
        /// Exit status of the child, when it could be collected.
        status: Option<ExitStatus>,
    },

    /// The session has already been stopped.
    #[error("omorfi process is not running")]
    NotRunning,

    /// Transport-level I/O error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response line could not be parsed.
    #[error("malformed response: {0}")]
    Record(#[from] RecordError),
}

fn describe_status(status: Option<&ExitStatus>) -> String {
    status.map_or_else(|| String::from("exit status unknown"), ToString::to_string)
}

/// Transport-layer errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A response line was not valid UTF-8.
    #[error("response line {} is not valid UTF-8: {source}", .received.len() + 1)]
    InvalidUtf8 {
        /// Response lines read before the offending one.
        received: Vec<String>,
        /// The decoding failure, which still holds the raw bytes.
        #[source]
        source: FromUtf8Error,
    },

    /// The stream ended before the blank line closing a response.
    #[error("stream closed after {} response line(s) without a terminator", .received.len())]
    Closed {
        /// Response lines read before the stream ended.
        received: Vec<String>,
    },
}

impl TransportError {
    /// Returns true when the error means the peer has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Closed { .. } => true,
            Self::InvalidUtf8 { .. } => false,
            Self::Io(error) => matches!(
                error.kind(),
                io::ErrorKind::BrokenPipe | io::ErrorKind::UnexpectedEof
            ),
        }
    }
}
