//! Error types for the CLI runtime.

use std::sync::Arc;

use omorfi_pipe::{AdapterError, SessionError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to start omorfi: {0}")]
    StartSession(#[source] SessionError),
    #[error("{0}")]
    Adapter(#[from] AdapterError),
}
