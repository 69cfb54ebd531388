//! Termination of the omorfi child process.

use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::SESSION_TARGET;

/// Time the child gets to exit on its own once its stdin is closed.
const GRACE_PERIOD: Duration = Duration::from_millis(200);

/// Interval between exit checks during the grace period.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Kills the child and reaps it, returning the collected status.
fn kill_child(child: &mut Child) -> Option<ExitStatus> {
    if let Err(error) = child.kill() {
        warn!(
            target: SESSION_TARGET,
            pid = child.id(),
            error = %error,
            "failed to kill omorfi process"
        );
    }
    child.wait().ok()
}

/// Polls the child until it exits or `grace` elapses.
fn wait_for_exit(child: &mut Child, grace: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + grace;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) => {}
            Err(error) => {
                warn!(
                    target: SESSION_TARGET,
                    error = %error,
                    "failed to check process status"
                );
                return None;
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Terminates a child process whose stdin has already been closed.
///
/// The child is reaped as soon as it exits; one still running once the grace
/// period is over is killed.
pub(super) fn terminate_child(child: &mut Child) -> Option<ExitStatus> {
    if let Some(status) = wait_for_exit(child, GRACE_PERIOD) {
        debug!(target: SESSION_TARGET, ?status, "omorfi process exited");
        return Some(status);
    }

    debug!(
        target: SESSION_TARGET,
        pid = child.id(),
        "omorfi process still running after grace period, killing"
    );
    kill_child(child)
}
