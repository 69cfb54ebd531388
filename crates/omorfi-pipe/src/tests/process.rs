//! Session tests against a scripted stand-in for omorfi run by `/bin/sh`.

use std::io::Cursor;
use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use crate::adapter::{AdapterMode, OutputFormat, run_adapter};
use crate::session::{ChildCommand, Exchange, ProcessSession, SessionError};

const FAKE_ANALYSER: &str = r#"while IFS= read -r word; do
  case "$word" in
    xyzzy) printf '%s\t%s+?\tinf\n\n' "$word" "$word" ;;
    koira) printf '\n' ;;
    quit) exit 3 ;;
    *) printf '%s\t%s+N+Sg+Nom\t0.5\n\n' "$word" "$word" ;;
  esac
done"#;

#[fixture]
fn analyser() -> ProcessSession {
    ProcessSession::start(ChildCommand::new("/bin/sh", FAKE_ANALYSER))
        .expect("fake analyser should start")
}

#[rstest]
fn send_returns_parsed_records(mut analyser: ProcessSession) {
    let records = analyser.send("kissa").expect("send failed");

    let outputs: Vec<&str> = records.iter().map(|record| record.output()).collect();
    assert_eq!(outputs, vec!["kissa+N+Sg+Nom"]);
}

#[rstest]
fn empty_response_and_inf_sentinel(mut analyser: ProcessSession) {
    let empty = analyser.send("koira").expect("send failed");
    let unknown = analyser.send("xyzzy").expect("send failed");

    assert!(empty.is_empty());
    assert_eq!(unknown.len(), 1);
    assert!(unknown.iter().all(|record| record.output() == "UNK"));
}

#[rstest]
fn stop_lets_the_child_exit_cleanly(analyser: ProcessSession) {
    assert!(analyser.is_running());
    assert!(analyser.id().is_some());

    let status = analyser.stop().expect("exit status should be collected");

    assert!(status.success());
}

#[rstest]
fn child_exit_mid_request_is_reported(mut analyser: ProcessSession) {
    let error = analyser.send("quit").expect_err("send should fail");

    match error {
        SessionError::ChildTerminated { request, status } => {
            assert_eq!(request, "quit");
            assert_eq!(status.and_then(|code| code.code()), Some(3));
        }
        other => panic!("expected child termination, got {other:?}"),
    }
    assert!(!analyser.is_running());
    assert!(matches!(
        analyser.send("kissa"),
        Err(SessionError::NotRunning)
    ));
}

#[rstest]
fn missing_shell_is_binary_not_found() {
    let command = ChildCommand::new("/nonexistent/path/to/sh", "omorfi-analyse-tokenised.sh");

    let error = ProcessSession::start(command).expect_err("start should fail");

    assert!(matches!(error, SessionError::BinaryNotFound { .. }));
    assert!(error.to_string().contains("/nonexistent/"));
}

#[rstest]
fn missing_working_dir_is_not_blamed_on_the_shell() {
    let command = ChildCommand::new("/bin/sh", "cat").with_working_dir("/nonexistent/omorfi");

    let error = ProcessSession::start(command).expect_err("start should fail");

    assert!(
        matches!(error, SessionError::SpawnFailed { .. }),
        "unexpected error: {error:?}"
    );
    assert!(error.to_string().contains("/nonexistent/omorfi"));
}

#[rstest]
fn child_starts_in_the_configured_directory() {
    let command = ChildCommand::new(
        "/bin/sh",
        r#"while IFS= read -r word; do printf '%s\t%s\t1\n\n' "$word" "$(pwd)"; done"#,
    )
    .with_working_dir("/");
    let mut session = ProcessSession::start(command).expect("session should start");

    let records = session.send("where").expect("send failed");

    assert_eq!(
        records.iter().map(|record| record.payload()).collect::<Vec<_>>(),
        vec!["/"]
    );
}

#[rstest]
fn drop_kills_a_child_that_ignores_stdin() {
    let session = ProcessSession::start(ChildCommand::new("/bin/sh", "exec sleep 30"))
        .expect("session should start");
    let started = Instant::now();

    drop(session);

    assert!(started.elapsed() < Duration::from_secs(10));
}

#[rstest]
fn analyser_loop_runs_over_a_live_session(mut analyser: ProcessSession) {
    let mut output = Vec::new();

    let summary = run_adapter(
        AdapterMode::Analyse,
        OutputFormat::Plain,
        &mut analyser,
        Cursor::new("kissa koira\nxyzzy\n\n"),
        &mut output,
    )
    .expect("run failed");

    assert_eq!(
        String::from_utf8(output).expect("utf8"),
        "kissa+N+Sg+Nom\nUNK\n"
    );
    assert_eq!(summary.requests, 3);
    assert_eq!(summary.unknown, 1);
}
