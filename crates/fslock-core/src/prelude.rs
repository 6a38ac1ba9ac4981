//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fslock_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{SandboxError, SandboxResult};

// Policy state
pub use crate::{Config, ConfigUpdate, ListName, LockState, SandboxContext};

// Normalization
pub use crate::PathNormalizer;
