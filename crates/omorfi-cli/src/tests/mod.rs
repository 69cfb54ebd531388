//! Unit tests for the CLI runtime with substituted configuration.

use std::ffi::OsString;
use std::io::Cursor;
use std::process::ExitCode;

use omorfi_config::Config;
use omorfi_pipe::{AdapterMode, OutputFormat};
use rstest::{fixture, rstest};

use crate::cli::{CliCommand, FormatArg};
use crate::config::ConfigLoader;
use crate::errors::AppError;
use crate::run_with_loader;

const FAKE_ANALYSER: &str = r#"while IFS= read -r word; do
  case "$word" in
    xyzzy) printf '%s\t%s+?\tinf\n\n' "$word" "$word" ;;
    koira) printf '\n' ;;
    *) printf '%s\t%s+N+Sg+Nom\t0.5\n\n' "$word" "$word" ;;
  esac
done"#;

const FAKE_GENERATOR: &str = r#"while IFS= read -r analysis; do
  case "$analysis" in
    kissa+N+Sg+Nom) printf '%s\tkissa\t0.2\n\n' "$analysis" ;;
    *) printf '%s\t%s\tinf\n\n' "$analysis" "$analysis" ;;
  esac
done"#;

struct StubLoader {
    config: Config,
}

impl ConfigLoader for StubLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

#[fixture]
fn loader() -> StubLoader {
    StubLoader {
        config: Config::default()
            .with_analyse_command(FAKE_ANALYSER)
            .with_generate_command(FAKE_GENERATOR),
    }
}

struct Outcome {
    exit_code: ExitCode,
    stdout: String,
    stderr: String,
}

fn invoke(loader: &StubLoader, args: &[&str], stdin: &str) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit_code = run_with_loader(
        args.iter().map(OsString::from),
        Cursor::new(stdin.to_owned()),
        &mut stdout,
        &mut stderr,
        loader,
    );
    Outcome {
        exit_code,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

#[rstest]
fn analyse_prints_one_line_per_analysis(loader: StubLoader) {
    let outcome = invoke(&loader, &["omorfi-pipe", "analyse"], "kissa koira\nxyzzy\n\n");

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "kissa+N+Sg+Nom\nUNK\n");
}

#[rstest]
fn analyse_morph_text_format(loader: StubLoader) {
    let outcome = invoke(
        &loader,
        &["omorfi-pipe", "analyse", "--format", "morph-text"],
        "kissa koira\n",
    );

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "kissa\tkissa+N+Sg+Nom\t0.5\nkoira\tUNK\tinf\n\n");
}

#[rstest]
fn generate_prints_surface_forms(loader: StubLoader) {
    let outcome = invoke(
        &loader,
        &["omorfi-pipe", "generate"],
        "kissa+N+Sg+Nom\nkisa+N\n",
    );

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "kissa\nUNK\n");
}

#[rstest]
fn missing_subcommand_is_a_usage_error(loader: StubLoader) {
    let outcome = invoke(&loader, &["omorfi-pipe"], "");

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.contains("Usage"), "stderr: {}", outcome.stderr);
}

#[rstest]
fn help_is_written_to_stdout(loader: StubLoader) {
    let outcome = invoke(&loader, &["omorfi-pipe", "--help"], "");

    assert_eq!(outcome.exit_code, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("--analyse-command"));
}

#[rstest]
fn malformed_child_output_fails_the_run() {
    let loader = StubLoader {
        config: Config::default()
            .with_analyse_command(r"while read -r w; do printf '%s only-two\n\n' $w; done"),
    };

    let outcome = invoke(&loader, &["omorfi-pipe", "analyse"], "kissa\n");

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(
        outcome.stderr.contains("malformed response"),
        "stderr: {}",
        outcome.stderr
    );
}

#[rstest]
fn child_exit_fails_the_run() {
    let loader = StubLoader {
        config: Config::default().with_analyse_command("exit 0"),
    };

    let outcome = invoke(&loader, &["omorfi-pipe", "analyse"], "kissa\n");

    assert_eq!(outcome.exit_code, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("terminated"), "stderr: {}", outcome.stderr);
}

#[rstest]
#[case(
    CliCommand::Analyse { format: FormatArg::Plain },
    AdapterMode::Analyse,
    OutputFormat::Plain
)]
#[case(
    CliCommand::Analyse { format: FormatArg::MorphText },
    AdapterMode::Analyse,
    OutputFormat::MorphText
)]
#[case(CliCommand::Generate, AdapterMode::Generate, OutputFormat::Plain)]
fn subcommands_select_mode_and_format(
    #[case] command: CliCommand,
    #[case] mode: AdapterMode,
    #[case] format: OutputFormat,
) {
    assert_eq!(command.mode(), mode);
    assert_eq!(command.format(), format);
}
