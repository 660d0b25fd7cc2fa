//! Registry error types.

use thiserror::Error;

/// Boxed error returned by a caller-supplied predicate.
pub type PredicateError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur with registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required argument was missing or malformed at an API boundary.
    ///
    /// Raised before any state is touched.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A predicate passed to `try_unsubscribe_if` failed.
    ///
    /// The caller's error is kept as the source, unchanged. Buckets processed
    /// before the failure stay mutated.
    #[error("Predicate failed: {source}")]
    PredicateFailure {
        /// The error returned by the predicate.
        #[source]
        source: PredicateError,
    },
}

impl RegistryError {
    /// Create an invalid argument error.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
