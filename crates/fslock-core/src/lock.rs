//! The one-shot configuration lock.
//!
//! Three flags drive it:
//!
//! - `config_set`: a configuration has been installed at least once
//! - `allow_change`: further reconfiguration is currently permitted
//! - `armed`: the first real call to `configure` has happened
//!
//! Once `armed` is set, `allow_change` can no longer be granted. A grant made
//! before arming (the test escape hatch) persists.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SandboxError, SandboxResult};

/// Warning emitted whenever the override escape hatch is used.
pub const OVERRIDE_WARNING: &str = "!! OVERRIDING FS LOCK - THIS SHOULD ONLY BE FOR TESTING";

/// Lock flags for the configuration store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    /// A configuration has been installed at least once.
    pub config_set: bool,
    /// Further reconfiguration is currently permitted.
    pub allow_change: bool,
    /// The production activation point has been reached.
    pub armed: bool,
}

impl LockState {
    /// Fresh state: nothing configured, nothing granted, not armed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config_set: false,
            allow_change: false,
            armed: false,
        }
    }

    /// Check whether a `configure` call may proceed, returning the
    /// `allow_change` value it should run with.
    ///
    /// # Errors
    ///
    /// See [`verify_config`].
    pub fn verify(&self, override_change: bool) -> SandboxResult<bool> {
        verify_config(self.config_set, self.allow_change, override_change, self.armed)
    }

    /// Run one `configure` step against the lock.
    ///
    /// On success the state records the installed configuration and returns
    /// whether the merge should discard the existing lists. The call is
    /// recorded as the activation point whatever the outcome.
    ///
    /// # Errors
    ///
    /// See [`verify_config`].
    pub fn advance(&mut self, override_change: bool) -> SandboxResult<bool> {
        let verdict = self.verify(override_change);
        self.armed = true;
        let allow_change = verdict?;
        self.allow_change = allow_change;
        self.config_set = true;
        Ok(allow_change)
    }
}

/// The lock rule, evaluated before every merge.
///
/// Returns the `allow_change` value the call runs with.
///
/// # Errors
///
/// - [`SandboxError::OverrideAfterActivation`] if an override is requested on
///   a locked configuration after activation.
/// - [`SandboxError::ConfigurationAlreadySet`] if a locked configuration is
///   changed without an override.
pub fn verify_config(
    config_set: bool,
    allow_change: bool,
    override_change: bool,
    armed: bool,
) -> SandboxResult<bool> {
    if config_set && !allow_change {
        if !override_change {
            return Err(SandboxError::ConfigurationAlreadySet);
        }
        if armed {
            return Err(SandboxError::OverrideAfterActivation);
        }
    }

    if override_change && !armed {
        warn!("{OVERRIDE_WARNING}");
        return Ok(true);
    }

    Ok(allow_change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_after_activation_fails() {
        let err = verify_config(true, false, true, true).unwrap_err();
        assert_eq!(err, SandboxError::OverrideAfterActivation);
        assert_eq!(
            err.to_string(),
            "Constructor already called, can not override allowChange"
        );
    }

    #[test]
    fn test_override_before_activation_grants_change() {
        assert!(verify_config(true, false, true, false).unwrap());
        assert!(verify_config(false, false, true, false).unwrap());
    }

    #[test]
    fn test_locked_without_override_fails() {
        let err = verify_config(true, false, false, false).unwrap_err();
        assert_eq!(err, SandboxError::ConfigurationAlreadySet);
        assert_eq!(err.to_string(), "Configuration already set, can not set again");
    }

    #[test]
    fn test_first_configuration_passes_through() {
        assert!(!verify_config(false, false, false, false).unwrap());
        assert!(!verify_config(false, false, false, true).unwrap());
    }

    #[test]
    fn test_granted_change_persists() {
        assert!(verify_config(true, true, false, true).unwrap());
        assert!(verify_config(true, true, true, true).unwrap());
    }

    #[test]
    fn test_advance_production_sequence() {
        let mut state = LockState::new();

        assert!(!state.advance(false).unwrap());
        assert_eq!(
            state,
            LockState {
                config_set: true,
                allow_change: false,
                armed: true,
            }
        );

        assert_eq!(
            state.advance(false).unwrap_err(),
            SandboxError::ConfigurationAlreadySet
        );
        assert_eq!(
            state.advance(true).unwrap_err(),
            SandboxError::OverrideAfterActivation
        );
        assert!(!state.allow_change);
    }

    #[test]
    fn test_advance_test_bootstrap_sequence() {
        let mut state = LockState::new();

        assert!(state.advance(true).unwrap());
        assert!(state.armed);
        assert!(state.allow_change);

        // The grant made before arming keeps later calls open.
        assert!(state.advance(false).unwrap());
        assert!(state.advance(true).unwrap());
    }
}
