//! Installation error types.

use fslock_config::ConfigError;
use fslock_core::SandboxError;
use thiserror::Error;

/// Errors raised while installing the sandbox.
#[derive(Debug, Error)]
pub enum FsLockError {
    /// The initial configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The policy rejected an operation.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    /// The base directory could not be determined.
    #[error("Failed to determine base directory: {0}")]
    BaseDir(#[source] std::io::Error),
}

/// Result type for installation.
pub type FsLockResult<T> = Result<T, FsLockError>;
