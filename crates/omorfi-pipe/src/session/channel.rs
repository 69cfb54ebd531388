//! Request/response exchange on top of a [`Transport`].

use tracing::{debug, trace};

use super::SESSION_TARGET;
use super::error::SessionError;
use super::transport::Transport;
use crate::record::Record;

/// Sends one request and returns the parsed records answering it.
///
/// The adapter loops only depend on this trait, so they run unchanged over a
/// live [`ProcessSession`](crate::ProcessSession), a [`RecordChannel`] over any
/// transport, or a test double.
#[cfg_attr(test, mockall::automock)]
pub trait Exchange {
    /// Sends `request` and drains every record of its response.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ChildTerminated`] if the peer goes away before
    /// the response is complete, and [`SessionError::Record`] if any response
    /// line is malformed.
    fn send(&mut self, request: &str) -> Result<Vec<Record>, SessionError>;
}

/// Parses blank-line framed responses from a transport into records.
pub struct RecordChannel<T> {
    transport: T,
}

impl<T: Transport> RecordChannel<T> {
    /// Wraps a transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Releases the underlying transport.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> Exchange for RecordChannel<T> {
    fn send(&mut self, request: &str) -> Result<Vec<Record>, SessionError> {
        debug!(target: SESSION_TARGET, request, "sending request");

        self.transport
            .send(request)
            .and_then(|()| self.transport.receive())
            .map_err(|error| {
                if error.is_closed() {
                    SessionError::ChildTerminated {
                        request: request.to_owned(),
                        status: None,
                    }
                } else {
                    SessionError::Transport(error)
                }
            })
            .and_then(|lines| {
                trace!(
                    target: SESSION_TARGET,
                    request,
                    lines = lines.len(),
                    "received response"
                );
                lines
                    .iter()
                    .map(|line| Record::parse(line).map_err(SessionError::from))
                    .collect()
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;
    use crate::record::RecordError;
    use crate::session::transport::StdioTransport;

    fn channel_with_output(
        output: &str,
    ) -> RecordChannel<StdioTransport<Cursor<Vec<u8>>, Vec<u8>>> {
        RecordChannel::new(StdioTransport::new(
            Cursor::new(output.as_bytes().to_vec()),
            Vec::new(),
        ))
    }

    #[rstest]
    fn parses_every_line_of_a_response() {
        let mut channel =
            channel_with_output("kissa\tkissa+N+Sg+Nom\t0.5\nkissa\tkissa+N+Sg+Gen\tinf\n\n");

        let records = channel.send("kissa").expect("send failed");

        let outputs: Vec<&str> = records.iter().map(Record::output).collect();
        assert_eq!(outputs, vec!["kissa+N+Sg+Nom", "UNK"]);

        let (_, written) = channel.into_inner().into_parts();
        assert_eq!(written, b"kissa\n");
    }

    #[rstest]
    fn empty_response_yields_no_records() {
        let mut channel = channel_with_output("\n");

        let records = channel.send("koira").expect("send failed");

        assert!(records.is_empty());
    }

    #[rstest]
    fn stream_closure_is_child_termination() {
        let mut channel = channel_with_output("kissa\tkissa+N\t0.5\n");

        let error = channel.send("kissa").expect_err("send should fail");

        assert!(matches!(
            error,
            SessionError::ChildTerminated { ref request, status: None } if request == "kissa"
        ));
    }

    #[rstest]
    fn malformed_line_is_fatal() {
        let mut channel = channel_with_output("kissa kissa+N 0.5\n\n");

        let error = channel.send("kissa").expect_err("send should fail");

        assert!(matches!(
            error,
            SessionError::Record(RecordError::FieldCount { found: 1, .. })
        ));
    }
}
