//! Policy error types.

use thiserror::Error;

/// Errors raised by the sandbox policy.
///
/// The `Display` output of every variant is part of the public contract:
/// hosts and scripts match on these strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    /// One or more path arguments of a filesystem operation fell outside
    /// `file_accessdir`. Only the denied paths are listed, in argument order.
    #[error("Access denied (file: {})", .paths.join(", "))]
    FileAccessDenied {
        /// The denied path arguments.
        paths: Vec<String>,
    },

    /// A resolved module file fell outside `open_basedir`.
    #[error("Access denied (module: {request})")]
    ModuleAccessDenied {
        /// The request string as the caller wrote it, never the resolved path.
        request: String,
    },

    /// A native library load target fell outside `file_accessdir`.
    #[error("Access denied (native module: {reference})")]
    NativeModuleAccessDenied {
        /// Whatever reference the caller passed in.
        reference: String,
    },

    /// A configuration was already installed and changes are not permitted.
    #[error("Configuration already set, can not set again")]
    ConfigurationAlreadySet,

    /// An override was requested after the sandbox was activated.
    #[error("Constructor already called, can not override allowChange")]
    OverrideAfterActivation,
}

impl SandboxError {
    /// Build a file denial for a single path.
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self::FileAccessDenied {
            paths: vec![path.into()],
        }
    }

    /// True for the access-denied family.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Self::FileAccessDenied { .. }
                | Self::ModuleAccessDenied { .. }
                | Self::NativeModuleAccessDenied { .. }
        )
    }

    /// True for lock violations raised by `configure`.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationAlreadySet | Self::OverrideAfterActivation
        )
    }
}

/// Result type for policy operations.
pub type SandboxResult<T> = Result<T, SandboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_denial_messages() {
        assert_eq!(
            SandboxError::file("/tmp").to_string(),
            "Access denied (file: /tmp)"
        );

        let both = SandboxError::FileAccessDenied {
            paths: vec!["/tmp".into(), "/tmp2".into()],
        };
        assert_eq!(both.to_string(), "Access denied (file: /tmp, /tmp2)");
    }

    #[test]
    fn test_module_and_native_messages() {
        let module = SandboxError::ModuleAccessDenied {
            request: "../package.json".into(),
        };
        assert_eq!(module.to_string(), "Access denied (module: ../package.json)");

        let native = SandboxError::NativeModuleAccessDenied {
            reference: "../../foo.node".into(),
        };
        assert_eq!(
            native.to_string(),
            "Access denied (native module: ../../foo.node)"
        );
    }

    #[test]
    fn test_error_families() {
        assert!(SandboxError::file("/x").is_access_denied());
        assert!(!SandboxError::file("/x").is_configuration_error());
        assert!(SandboxError::ConfigurationAlreadySet.is_configuration_error());
        assert!(SandboxError::OverrideAfterActivation.is_configuration_error());
        assert!(!SandboxError::OverrideAfterActivation.is_access_denied());
    }
}
