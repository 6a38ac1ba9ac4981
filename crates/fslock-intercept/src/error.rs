//! Errors seen by host primitives and continuations.

use fslock_core::SandboxError;
use thiserror::Error;

/// Errors produced by wrapped host operations.
///
/// Policy denials are carried transparently so their text is exactly the
/// policy's.
#[derive(Debug, Error)]
pub enum HostError {
    /// The sandbox policy refused the call.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    /// The real operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An argument had the wrong shape for the operation.
    #[error("Invalid argument for {operation}: {message}")]
    InvalidArgument {
        /// Operation being invoked.
        operation: String,
        /// What was wrong.
        message: String,
    },

    /// No primitive is registered under this name.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// No binding table is registered under this name.
    #[error("No such binding: {0}")]
    UnknownBinding(String),
}

impl HostError {
    /// Build an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// The policy error, if this is a denial.
    #[must_use]
    pub fn as_sandbox(&self) -> Option<&SandboxError> {
        match self {
            Self::Sandbox(e) => Some(e),
            _ => None,
        }
    }

    /// True if the sandbox refused the call.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        self.as_sandbox().is_some_and(SandboxError::is_access_denied)
    }
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
