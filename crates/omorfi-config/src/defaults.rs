use crate::logging::LogFormat;

/// Default command line used to start the omorfi analyser.
pub const DEFAULT_ANALYSE_COMMAND: &str = "omorfi-analyse-tokenised.sh";

/// Default command line used to start the omorfi generator.
pub const DEFAULT_GENERATE_COMMAND: &str = "omorfi-generate.sh";

/// Default shell used to interpret the configured command lines.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Owned analyser command used where allocation is required (e.g. serde).
pub fn default_analyse_command() -> String {
    DEFAULT_ANALYSE_COMMAND.to_owned()
}

/// Owned generator command used where allocation is required (e.g. serde).
pub fn default_generate_command() -> String {
    DEFAULT_GENERATE_COMMAND.to_owned()
}

/// Owned shell path used where allocation is required (e.g. serde).
pub fn default_shell() -> String {
    DEFAULT_SHELL.to_owned()
}

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::default()
}
