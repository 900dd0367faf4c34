//! Error handling module for archsetup
//!
//! Provides the error taxonomy for the provisioning pipeline using thiserror.
//! Every fatal condition maps to one of these variants; none are recovered
//! locally, so the first error aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for archsetup
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The tool was started as the superuser
    #[error(
        "Refusing to run as root: run archsetup as a regular user with sudo rights \
         (AUR helpers cannot be built as root)"
    )]
    InvalidPrivilegeLevel,

    /// Confirmation was required but stdin is closed or unreadable
    #[error(
        "No terminal to confirm on (stdin closed); set ARCHSETUP_ASSUME_YES=1 to run \
         non-interactively"
    )]
    ConfirmationUnavailable,

    /// No manifest source could be determined
    #[error("No manifest source available")]
    SourceUnavailable,

    /// The resolved local manifest does not exist
    #[error(
        "Manifest not found: {}\n  Create the manifest file, pass a manifest path as the \
         first argument, or run without arguments to use the remote default",
        .path.display()
    )]
    FileNotFound { path: PathBuf },

    /// The remote manifest could not be fetched or was empty
    #[error("Failed to retrieve manifest from {url}: {reason}")]
    RetrievalFailed { url: String, reason: String },

    /// A package manager, AUR helper, shell, clone, or build invocation failed
    #[error("Command failed ({}): {command}", describe_exit(.code))]
    ExternalCommandFailed { command: String, code: Option<i32> },

    /// Configuration errors (config file, environment overrides)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors (spawning processes, reading files, scratch directories)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "terminated by signal".to_string(),
    }
}

/// Result type alias for archsetup operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

impl ProvisionError {
    /// Create a retrieval error
    pub fn retrieval(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RetrievalFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an external command error
    pub fn command_failed(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::ExternalCommandFailed {
            command: command.into(),
            code,
        }
    }
}

impl From<anyhow::Error> for ProvisionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Config(format!("{:#}", err))
    }
}
