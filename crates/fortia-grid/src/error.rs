use crate::config::ConfigError;
use crate::grid::controller::ControllerError;
use crate::grid::mount::MountError;
use crate::telemetry::TelemetryError;
use crate::views::snapshot::SnapshotImportError;
use std::fmt;

/// Failures a grid host can surface to its caller.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Snapshot(SnapshotImportError),
    Mount(MountError),
    Controller(ControllerError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Snapshot(err) => write!(f, "snapshot error: {err}"),
            AppError::Mount(err) => write!(f, "mount error: {err}"),
            AppError::Controller(err) => write!(f, "table error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
            AppError::Mount(err) => Some(err),
            AppError::Controller(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SnapshotImportError> for AppError {
    fn from(value: SnapshotImportError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<MountError> for AppError {
    fn from(value: MountError) -> Self {
        Self::Mount(value)
    }
}

impl From<ControllerError> for AppError {
    fn from(value: ControllerError) -> Self {
        Self::Controller(value)
    }
}
