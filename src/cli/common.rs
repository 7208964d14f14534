//! Shared error and exit code types for CLI commands.

use std::fmt;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad or missing input (unknown keyboard, invalid filter, ...)
    ValidationError = 1,
    /// Filesystem or data problem (unreadable file, malformed JSON, write failure)
    IoError = 2,
}

impl ExitCode {
    /// Returns the numeric process exit code.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, carrying the exit code to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub exit_code: ExitCode,
    /// Human-readable message
    pub message: String,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
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

/// Formats an `anyhow` error with its full context chain on one line.
pub fn error_chain(err: &anyhow::Error) -> String {
    format!("{err:#}")
}
