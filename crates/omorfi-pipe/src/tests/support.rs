//! Test doubles standing in for the omorfi child process.

use std::collections::HashMap;

use crate::record::Record;
use crate::session::{Exchange, SessionError};

/// Answers requests from a table of canned response lines.
///
/// Unknown requests get an empty response, mirroring a child that prints only
/// the blank terminator. Requests named in `terminate_on` behave as if the
/// child had exited mid-response.
#[derive(Debug, Default)]
pub(crate) struct FakeOmorfi {
    responses: HashMap<String, Vec<String>>,
    terminate_on: Option<String>,
    pub(crate) sent: Vec<String>,
}

impl FakeOmorfi {
    pub(crate) fn respond(&mut self, request: &str, line: impl Into<String>) {
        self.responses
            .entry(request.to_owned())
            .or_default()
            .push(line.into());
    }

    pub(crate) fn terminate_on(&mut self, request: &str) {
        self.terminate_on = Some(request.to_owned());
    }
}

impl Exchange for FakeOmorfi {
    fn send(&mut self, request: &str) -> Result<Vec<Record>, SessionError> {
        self.sent.push(request.to_owned());
        if self.terminate_on.as_deref() == Some(request) {
            return Err(SessionError::ChildTerminated {
                request: request.to_owned(),
                status: None,
            });
        }

        self.responses
            .get(request)
            .map_or_else(Vec::new, Clone::clone)
            .iter()
            .map(|line| Record::parse(line).map_err(SessionError::from))
            .collect()
    }
}
