//! Shared types for CLI commands.

use std::fmt;

use crate::models::ConvertError;

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully
    Success = 0,
    /// Invalid input: unknown part, empty or unordered layout, bad arguments
    ValidationError = 1,
    /// Filesystem or parse failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit status.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command, carrying the exit code to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Classifies an error from the service layer.
    ///
    /// Conversion failures map to validation errors, everything else
    /// (unreadable files, malformed JSON) to I/O errors.
    #[must_use]
    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        let message = format!("{error:#}");
        if error.downcast_ref::<ConvertError>().is_some() {
            Self::validation(message)
        } else {
            Self::io(message)
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
