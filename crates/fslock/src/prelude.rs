//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fslock::prelude::*;` to import all essential types.

// Installation
pub use crate::{FsLock, FsLockError, FsLockResult, InstallOptions};

// Policy
pub use crate::{Config, ConfigUpdate, ListName, SandboxError, SandboxResult};

// Host boundary
pub use crate::{BindingTable, HostError, HostResult, HostValue, NativeTarget, SealedBindings};
