//! Internal state of the child process owned by a session.

use std::process::Child;

use super::channel::RecordChannel;
use super::transport::ChildTransport;

/// Internal state of the omorfi process.
pub(super) enum ProcessState {
    /// Process is running and ready for requests.
    Running {
        /// The child process handle.
        child: Child,
        /// The record channel over the child's stdio.
        channel: RecordChannel<ChildTransport>,
    },
    /// Process has been stopped or has terminated.
    Stopped,
}
