//! Ownership of the external omorfi process and its line protocol.
//!
//! The child speaks a line-oriented protocol: one request per line on its
//! stdin, and zero or more tab-separated response lines on its stdout
//! followed by a blank line.
//!
//! # Architecture
//!
//! - [`ChildCommand`]: how to launch the child (shell, command line, directory)
//! - [`SessionError`] and [`TransportError`]: error types for session operations
//! - [`Transport`] and [`StdioTransport`]: blank-line framed line transport
//! - [`Exchange`] and [`RecordChannel`]: `send(request) -> records` over any transport
//! - [`ProcessSession`]: owns a running child and cleans it up on every path
//!
//! # Example
//!
//! ```no_run
//! use omorfi_pipe::{AdapterMode, ChildCommand, Exchange, ProcessSession};
//!
//! # fn main() -> Result<(), omorfi_pipe::SessionError> {
//! let mut session = ProcessSession::start(ChildCommand::for_mode(AdapterMode::Analyse))?;
//! let records = session.send("kissa")?;
//! let _status = session.stop();
//! # drop(records);
//! # Ok(())
//! # }
//! ```

mod channel;
mod config;
mod error;
mod lifecycle;
mod process;
mod state;
mod transport;

pub use channel::{Exchange, RecordChannel};
pub use config::ChildCommand;
pub use error::{SessionError, TransportError};
pub use process::ProcessSession;
pub use transport::{ChildTransport, StdioTransport, Transport};

#[cfg(test)]
pub use channel::MockExchange;

/// Log target for session operations.
pub(crate) const SESSION_TARGET: &str = "omorfi_pipe::session";
