//! fslock - an in-process filesystem sandbox.
//!
//! Restricts which paths a process may touch through the primitives it
//! routes through the sandbox, which directories modules may be resolved
//! from and which native libraries may be loaded. Aimed at hosts running
//! plugins or user scripts in-process.
//!
//! # Key Concepts
//!
//! - **`file_accessdir`**: directories filesystem operations and native
//!   loads may touch
//! - **`open_basedir`**: directories modules may be resolved from
//! - **Lock**: the first `configure` call freezes the policy; only an
//!   override issued before that point (test fixtures) can reopen it
//! - **Fail-open default**: a list nobody configured allows `/`
//!
//! # Example
//!
//! ```rust
//! use fslock::prelude::*;
//!
//! let lock = FsLock::install(
//!     InstallOptions::new()
//!         .with_base_dir("/srv/app")
//!         .with_initial_config(Config::default()),
//! )?;
//! lock.configure(
//!     &ConfigUpdate::new()
//!         .file_accessdir(["/srv/app"])
//!         .open_basedir(["/srv/app/modules"]),
//!     false,
//! )?;
//!
//! let fs = lock.guard_fs(BindingTable::new().with("unlink", |_| Ok(HostValue::Undefined)));
//! let err = fs.call("unlink", vec!["/etc/hosts".into()]).unwrap_err();
//! assert_eq!(err.to_string(), "Access denied (file: /etc/hosts)");
//! assert!(lock.is_require_allowed("modules/util.js"));
//! # Ok::<(), fslock::FsLockError>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod error;
pub mod install;
pub mod introspect;

pub use error::{FsLockError, FsLockResult};
pub use install::{FsLock, InstallOptions};

pub use fslock_config as config;
pub use fslock_core::{
    Config, ConfigUpdate, ListName, LockState, PathNormalizer, SandboxContext, SandboxError,
    SandboxResult,
};
pub use fslock_intercept::{
    BindingTable, FsOperation, HostError, HostResult, HostValue, Mediator, ModuleLoadGuard,
    NativeTarget, ProcessBindings, SealedBindings,
};
pub use fslock_telemetry as telemetry;
