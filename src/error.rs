use crate::core::types::ServiceStatus;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostspecError {
    /// Type tag outside the fixed set of package managers or init systems
    #[error("Unsupported {family} backend: '{name}'")]
    UnsupportedBackend { family: &'static str, name: String },

    /// The tool could not be spawned, timed out, or exited non-zero
    #[error("Command '{command}' failed: {reason}")]
    ExecutionFailed {
        command: String,
        reason: String,
        output: String,
    },

    /// Output did not have the shape the driver expects
    #[error("Failed to parse output of '{command}': {message} (line: {line:?})")]
    ParseFailed {
        command: String,
        message: String,
        line: String,
    },

    #[error("Unable to look up {package}: no package found")]
    NotFound { package: String },

    #[error(
        "Requested package versions: [{}], found: [{}]",
        .requested.join(", "),
        .found.join(", ")
    )]
    VersionMismatch {
        package: String,
        requested: Vec<String>,
        found: Vec<String>,
    },

    #[error("Unable to determine {service} status")]
    AmbiguousStatus {
        service: String,
        init: String,
        output: String,
    },

    #[error("Service '{service}' is {actual}, expected {expected}")]
    StatusMismatch {
        service: String,
        expected: ServiceStatus,
        actual: ServiceStatus,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HostspecError {
    /// Status implied by a failed status query.
    ///
    /// A tool that cannot be reached and output that matches no signature
    /// both leave the service in [`ServiceStatus::Unknown`].
    pub fn implied_status(&self) -> Option<ServiceStatus> {
        match self {
            Self::ExecutionFailed { .. } | Self::AmbiguousStatus { .. } => {
                Some(ServiceStatus::Unknown)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HostspecError>;
