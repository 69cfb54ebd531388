//! Line-oriented adapters around the omorfi morphological tools.
//!
//! The crate owns one long-lived omorfi process per run, forwards input to it
//! one request at a time, and reduces each tab-separated response record to
//! either its payload or the `UNK` placeholder. Transport, record parsing and
//! the adapter loops are separate layers: the loops only see the
//! [`Exchange`] trait, so tests and other transports can stand in for a real
//! child process.

mod adapter;
mod record;
mod session;

pub use adapter::{
    AdapterError, AdapterMode, OutputFormat, RunSummary, analyse, generate, run_adapter,
};
pub use record::{Probability, Record, RecordError, UNKNOWN_OUTPUT};
pub use session::{
    ChildCommand, ChildTransport, Exchange, ProcessSession, RecordChannel, SessionError,
    StdioTransport, Transport, TransportError,
};

#[cfg(test)]
mod tests;
