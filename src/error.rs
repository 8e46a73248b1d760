//! Error types for the contact book.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by address book operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// No record is stored under this name
    #[error("Contact not found: {0}")]
    KeyNotFound(String),
}

/// Errors a command handler can return.
///
/// Every variant keeps enough context for logs. Users only ever see the
/// coarse [`ErrorKind`] text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The named contact does not exist
    #[error("{command}: contact not found: {name}")]
    KeyNotFound { command: &'static str, name: String },

    /// A field value was rejected
    #[error("{command}: {source}")]
    Validation {
        command: &'static str,
        source: ValidationError,
    },

    /// Too few arguments were given
    #[error("{command}: missing argument, usage: {command} {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}

impl CommandError {
    pub fn validation(command: &'static str, source: ValidationError) -> Self {
        Self::Validation { command, source }
    }

    pub fn not_found(command: &'static str, name: impl Into<String>) -> Self {
        Self::KeyNotFound {
            command,
            name: name.into(),
        }
    }

    /// The category shown to the user.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
        }
    }

    /// Name of the command that failed.
    pub fn command(&self) -> &'static str {
        match self {
            Self::KeyNotFound { command, .. }
            | Self::Validation { command, .. }
            | Self::MissingArgument { command, .. } => *command,
        }
    }
}

/// Coarse error categories, rendered as fixed text at the command boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    KeyNotFound,
    Validation,
    MissingArgument,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeyNotFound => "KeyNotFound",
            Self::Validation => "ValidationError",
            Self::MissingArgument => "MissingArgument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while loading or saving the address book.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but does not hold a valid address book
    #[error("Failed to decode address book {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The address book could not be serialized
    #[error("Failed to encode address book: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors that end an interactive session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading input or writing output failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The address book could not be saved
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with BookError
pub type BookResult<T> = Result<T, BookError>;

/// Convenience type alias for Results with CommandError
pub type CommandResult<T> = Result<T, CommandError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with SessionError
pub type SessionResult<T> = Result<T, SessionError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
