//! Analyser and generator loops translating stdin lines into child requests.
//!
//! Both loops read input one line at a time and stop at the first blank line
//! or at end of input. The analyser sends every whitespace-separated token of
//! a line as its own request; the generator sends the whole trimmed line.
//! Each record of a response becomes one output line: `UNK` when the child
//! reported an `inf` probability, the payload otherwise.
//!
//! Input and child output must be UTF-8, which is what omorfi reads and
//! writes. A line in another encoding stops the run with
//! [`AdapterError::InvalidInput`] naming the line, rather than being passed
//! to the child in a form it cannot analyse.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing::{debug, info};

use crate::record::{Record, UNKNOWN_OUTPUT};
use crate::session::{Exchange, SessionError};

/// Log target for adapter operations.
const ADAPTER_TARGET: &str = "omorfi_pipe::adapter";

/// Probability written in morph text for tokens without any record.
const MISSING_PROBABILITY: &str = "inf";

/// Which omorfi tool the adapter drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterMode {
    /// Surface forms in, analyses out.
    Analyse,
    /// Analyses in, surface forms out.
    Generate,
}

impl AdapterMode {
    /// Splits a trimmed input line into the requests sent to the child.
    #[must_use]
    pub fn requests(self, line: &str) -> Vec<&str> {
        match self {
            Self::Analyse => line.split_whitespace().collect(),
            Self::Generate => vec![line.trim()],
        }
    }

    /// Stable lowercase name used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analyse => "analyse",
            Self::Generate => "generate",
        }
    }
}

impl fmt::Display for AdapterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of the adapter's standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per record: `UNK` or the payload.
    #[default]
    Plain,
    /// One line per token, `token\tanalysis\tprob...`, and a blank line after
    /// each input line. Only meaningful for analysis.
    MorphText,
}

/// Counters describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines processed, excluding the terminating blank line.
    pub lines: usize,
    /// Requests sent to the child.
    pub requests: usize,
    /// Records received from the child.
    pub records: usize,
    /// Records carrying the `inf` sentinel.
    pub unknown: usize,
}

impl RunSummary {
    fn count(&mut self, records: &[Record]) {
        self.requests += 1;
        self.records += records.len();
        self.unknown += records.iter().filter(|record| record.is_unknown()).count();
    }
}

/// Errors that abort an adapter run.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Reading standard input failed.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] io::Error),

    /// An input line was not valid UTF-8.
    #[error("input line {line} is not valid UTF-8: {source}")]
    InvalidInput {
        /// One-based number of the offending input line.
        line: usize,
        /// The decoding failure, which still holds the raw bytes.
        #[source]
        source: FromUtf8Error,
    },

    /// Writing standard output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),

    /// The requested output format does not apply to this mode.
    #[error("{format:?} output is not available when running {mode}")]
    UnsupportedFormat {
        /// The adapter mode.
        mode: AdapterMode,
        /// The rejected format.
        format: OutputFormat,
    },

    /// The child exchange failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Runs the analyser loop with plain output.
///
/// # Errors
///
/// See [`run_adapter`].
pub fn analyse<E, R, W>(
    exchange: &mut E,
    input: R,
    output: &mut W,
) -> Result<RunSummary, AdapterError>
where
    E: Exchange + ?Sized,
    R: BufRead,
    W: Write,
{
    run_adapter(AdapterMode::Analyse, OutputFormat::Plain, exchange, input, output)
}

/// Runs the generator loop.
///
/// # Errors
///
/// See [`run_adapter`].
pub fn generate<E, R, W>(
    exchange: &mut E,
    input: R,
    output: &mut W,
) -> Result<RunSummary, AdapterError>
where
    E: Exchange + ?Sized,
    R: BufRead,
    W: Write,
{
    run_adapter(AdapterMode::Generate, OutputFormat::Plain, exchange, input, output)
}

/// Pipes `input` through `exchange` and writes the results to `output`.
///
/// Requests are strictly sequential: a request is sent only after every
/// record of the previous response has been written. Output is flushed after
/// each input line.
///
/// # Errors
///
/// Returns [`AdapterError::UnsupportedFormat`] for morph text generation,
/// [`AdapterError::Session`] when the child fails or answers with a malformed
/// record, [`AdapterError::InvalidInput`] for an input line that is not
/// UTF-8, and the I/O variants when reading input or writing output fails.
pub fn run_adapter<E, R, W>(
    mode: AdapterMode,
    format: OutputFormat,
    exchange: &mut E,
    mut input: R,
    output: &mut W,
) -> Result<RunSummary, AdapterError>
where
    E: Exchange + ?Sized,
    R: BufRead,
    W: Write,
{
    if mode == AdapterMode::Generate && format == OutputFormat::MorphText {
        return Err(AdapterError::UnsupportedFormat { mode, format });
    }

    let mut summary = RunSummary::default();

    loop {
        let mut bytes = Vec::new();
        let bytes_read = input
            .read_until(b'\n', &mut bytes)
            .map_err(AdapterError::ReadInput)?;
        let line = String::from_utf8(bytes).map_err(|source| AdapterError::InvalidInput {
            line: summary.lines + 1,
            source,
        })?;
        let trimmed = line.trim();
        if bytes_read == 0 || trimmed.is_empty() {
            debug!(
                target: ADAPTER_TARGET,
                mode = %mode,
                end_of_input = bytes_read == 0,
                "input finished"
            );
            break;
        }

        summary.lines += 1;
        for request in mode.requests(trimmed) {
            let records = exchange.send(request)?;
            summary.count(&records);
            write_records(format, request, &records, output)
                .map_err(AdapterError::WriteOutput)?;
        }

        if format == OutputFormat::MorphText {
            writeln!(output).map_err(AdapterError::WriteOutput)?;
        }
        output.flush().map_err(AdapterError::WriteOutput)?;
    }

    info!(
        target: ADAPTER_TARGET,
        mode = %mode,
        lines = summary.lines,
        requests = summary.requests,
        records = summary.records,
        unknown = summary.unknown,
        "adapter run complete"
    );
    Ok(summary)
}

fn write_records<W: Write + ?Sized>(
    format: OutputFormat,
    request: &str,
    records: &[Record],
    output: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            for record in records {
                writeln!(output, "{}", record.output())?;
            }
            Ok(())
        }
        OutputFormat::MorphText => {
            write!(output, "{request}")?;
            if records.is_empty() {
                write!(output, "\t{UNKNOWN_OUTPUT}\t{MISSING_PROBABILITY}")?;
            }
            for record in records {
                write!(output, "\t{}\t{}", record.output(), record.probability_text())?;
            }
            writeln!(output)
        }
    }
}
