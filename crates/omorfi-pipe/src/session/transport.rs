//! Line transport with blank-line framing.
//!
//! Requests are single lines. Each response is a run of lines closed by a
//! line that is empty or whitespace-only:
//! ```text
//! kissa\tkissa+N+Sg+Nom\t0.5\n
//! \n
//! ```

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process::{ChildStdin, ChildStdout};

use super::error::TransportError;

/// Moves request lines out and framed responses back in.
///
/// [`StdioTransport`] is the only production implementation; the seam exists
/// so the same record parsing can run over pipes, sockets or test doubles.
pub trait Transport {
    /// Writes `request` followed by a line terminator and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if writing fails.
    fn send(&mut self, request: &str) -> Result<(), TransportError>;

    /// Reads lines up to the next blank line (blocks until complete).
    ///
    /// The blank terminator is consumed and not returned; line terminators
    /// are stripped from the returned lines.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] if the stream ends before the
    /// terminator, [`TransportError::InvalidUtf8`] for a line that is not
    /// UTF-8, and [`TransportError::Io`] if reading fails.
    fn receive(&mut self) -> Result<Vec<String>, TransportError>;
}

/// Transport over a buffered reader and writer pair.
pub struct StdioTransport<R, W> {
    reader: R,
    writer: W,
}

/// Transport over a spawned child's stdout and stdin.
pub type ChildTransport = StdioTransport<BufReader<ChildStdout>, BufWriter<ChildStdin>>;

impl<R, W> StdioTransport<R, W> {
    /// Creates a transport reading responses from `reader` and writing
    /// requests to `writer`.
    #[must_use]
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Releases the underlying reader and writer.
    #[must_use]
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl ChildTransport {
    /// Creates a transport from process handles.
    #[must_use]
    pub fn from_child(stdout: ChildStdout, stdin: ChildStdin) -> Self {
        Self::new(BufReader::new(stdout), BufWriter::new(stdin))
    }
}

impl<R: BufRead, W: Write> Transport for StdioTransport<R, W> {
    fn send(&mut self, request: &str) -> Result<(), TransportError> {
        self.writer.write_all(request.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive(&mut self) -> Result<Vec<String>, TransportError> {
        let mut received = Vec::new();

        loop {
            let mut bytes = Vec::new();
            if self.reader.read_until(b'\n', &mut bytes)? == 0 {
                return Err(TransportError::Closed { received });
            }

            let line = match String::from_utf8(bytes) {
                Ok(line) => line,
                Err(source) => return Err(TransportError::InvalidUtf8 { received, source }),
            };
            if line.trim().is_empty() {
                return Ok(received);
            }

            received.push(line.trim_end_matches(['\r', '\n']).to_owned());
        }
    }
}
