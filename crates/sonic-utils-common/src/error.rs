//! Error types for CLI operations.
//!
//! This module defines the error types used throughout the configuration
//! CLI. All errors implement `std::error::Error` via `thiserror`.

use std::io;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur during CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// User-facing validation failure (bad argument, disallowed operation).
    #[error("{message}")]
    UserError {
        /// Descriptive message for the operator.
        message: String,
    },

    /// No registered command matches the requested token.
    #[error("No such command '{requested}'")]
    UnknownCommand {
        /// The token the operator typed.
        requested: String,
    },

    /// Several registered commands match the requested abbreviation.
    #[error("Too many matches: {candidates}")]
    AmbiguousCommand {
        /// Sorted, comma-joined candidate command names.
        candidates: String,
    },

    /// Operator declined a confirmation prompt.
    #[error("Aborted!")]
    Aborted,

    /// Redis/database operation failed.
    #[error("Database operation failed: {operation}: {message}")]
    Database {
        /// The operation that failed (e.g., "get", "set", "connect").
        operation: String,
        /// Error message.
        message: String,
    },

    /// Failed to execute a shell command (spawn error).
    #[error("Failed to execute shell command '{command}': {source}")]
    ShellExec {
        /// The command that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Shell command returned non-zero exit code.
    #[error("Shell command failed: '{command}' (exit code {exit_code}): {output}")]
    ShellCommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },
}

impl CliError {
    /// Creates a user-facing validation error.
    pub fn user_error(message: impl Into<String>) -> Self {
        Self::UserError {
            message: message.into(),
        }
    }

    /// Creates a database error.
    pub fn database(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Database {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error was caused by operator input rather than
    /// a backend failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CliError::UserError { .. }
                | CliError::UnknownCommand { .. }
                | CliError::AmbiguousCommand { .. }
                | CliError::Aborted
        )
    }

    /// Returns the process exit code this error maps to.
    ///
    /// Wrapped subprocess failures propagate the subprocess exit code;
    /// everything else exits 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ShellCommandFailed { exit_code, .. } => match u8::try_from(*exit_code) {
                Ok(0) | Err(_) => 1,
                Ok(code) => code,
            },
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_display() {
        let err = CliError::user_error("Ethernet24 is configured as mirror destination port");
        assert_eq!(
            err.to_string(),
            "Ethernet24 is configured as mirror destination port"
        );
        assert!(err.is_user_error());
    }

    #[test]
    fn test_ambiguous_display() {
        let err = CliError::AmbiguousCommand {
            candidates: "status, stop".to_string(),
        };
        assert_eq!(err.to_string(), "Too many matches: status, stop");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_database_error() {
        let err = CliError::database("hgetall", "Connection refused");
        assert_eq!(
            err.to_string(),
            "Database operation failed: hgetall: Connection refused"
        );
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_exit_code_propagates_subprocess() {
        let err = CliError::ShellCommandFailed {
            command: "sonic-cfggen -d --print-data".to_string(),
            exit_code: 42,
            output: String::new(),
        };
        assert_eq!(err.exit_code(), 42);
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        assert_eq!(CliError::user_error("bad").exit_code(), 1);
        let weird = CliError::ShellCommandFailed {
            command: "x".to_string(),
            exit_code: -1,
            output: String::new(),
        };
        assert_eq!(weird.exit_code(), 1);
    }
}
