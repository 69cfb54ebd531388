//! Parsing of the child's tab-separated response records.
//!
//! Every response line carries exactly three fields:
//!
//! ```text
//! <first-field>\t<payload>\t<probability>
//! ```
//!
//! For the analyser the first field is the surface form and the payload is
//! the analysis; for the generator the first field is the analysis and the
//! payload is the generated word. A probability of `inf` marks a line that
//! carries no usable result.

use std::num::ParseFloatError;

use thiserror::Error;

/// Output emitted in place of the payload when the child has no result.
pub const UNKNOWN_OUTPUT: &str = "UNK";

/// Probability literal used by the child to signal "no result".
const INFINITE_PROBABILITY: &str = "inf";

/// Errors raised while parsing a response line.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The line did not split into exactly three tab-separated fields.
    #[error("expected 3 tab-separated fields but found {found} in {line:?}")]
    FieldCount {
        /// Number of fields found.
        found: usize,
        /// The offending line, without its terminator.
        line: String,
    },

    /// The probability field was neither `inf` nor a number.
    #[error("invalid probability {value:?}: {source}")]
    InvalidProbability {
        /// The trimmed probability text.
        value: String,
        /// The underlying parse failure.
        #[source]
        source: ParseFloatError,
    },
}

/// The third field of a response record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probability {
    /// The `inf` sentinel: the child found no valid result.
    Infinite,
    /// A numeric weight reported by the child.
    Value(f64),
}

impl Probability {
    fn parse(text: &str) -> Result<Self, RecordError> {
        let trimmed = text.trim();
        if trimmed == INFINITE_PROBABILITY {
            return Ok(Self::Infinite);
        }
        trimmed
            .parse::<f64>()
            .map(Self::Value)
            .map_err(|source| RecordError::InvalidProbability {
                value: trimmed.to_owned(),
                source,
            })
    }
}

/// One parsed response line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    source: String,
    payload: String,
    probability: Probability,
    probability_text: String,
}

impl Record {
    /// Parses a single response line.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::FieldCount`] unless the line has exactly three
    /// fields, and [`RecordError::InvalidProbability`] when the third field
    /// is neither `inf` nor a number.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = trimmed.split('\t').collect();
        match fields.as_slice() {
            [source, payload, probability] => Ok(Self {
                source: (*source).to_owned(),
                payload: (*payload).to_owned(),
                probability: Probability::parse(probability)?,
                probability_text: probability.trim().to_owned(),
            }),
            other => Err(RecordError::FieldCount {
                found: other.len(),
                line: trimmed.to_owned(),
            }),
        }
    }

    /// The first field: the surface form or the requested analysis.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The second field: the analysis or the generated word.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The parsed third field.
    #[must_use]
    pub const fn probability(&self) -> Probability {
        self.probability
    }

    /// The third field as the child wrote it, trimmed.
    #[must_use]
    pub fn probability_text(&self) -> &str {
        &self.probability_text
    }

    /// Returns true when the child marked this record with `inf`.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self.probability, Probability::Infinite)
    }

    /// The text printed for this record: `UNK` or the payload verbatim.
    #[must_use]
    pub fn output(&self) -> &str {
        if self.is_unknown() {
            UNKNOWN_OUTPUT
        } else {
            &self.payload
        }
    }
}
