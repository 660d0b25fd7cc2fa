//! Telemetry error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The base level filter does not parse.
    #[error("Invalid log level {level:?}: {reason}")]
    InvalidLevel {
        /// The rejected level string.
        level: String,
        /// Parser message.
        reason: String,
    },

    /// A directive override does not parse.
    #[error("Invalid log directive {directive:?}: {reason}")]
    InvalidDirective {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// The directory for file logging could not be created.
    #[error("Cannot create log directory {}: {source}", path.display())]
    LogDirectory {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Another global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
