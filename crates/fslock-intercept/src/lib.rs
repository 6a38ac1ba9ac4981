//! fslock intercept - the mediator between host primitives and the policy.
//!
//! An embedding host keeps its own filesystem and module-loading primitives
//! and routes them through this crate:
//!
//! - [`Mediator`] exposes one `before_*` hook per guarded operation plus
//!   module resolution and native loads
//! - [`Interceptor`] wraps positional primitives so a denial reaches the
//!   caller through its own calling convention (synchronous, callback or
//!   completion object) and the real operation never runs
//! - [`BindingTable`] / [`ProcessBindings`] install the wrappers over a
//!   whole `fs` table
//! - [`ModuleLoadGuard`] checks resolved module files and native load targets
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fslock_core::{ConfigUpdate, PathNormalizer, SandboxContext};
//! use fslock_intercept::{BindingTable, HostValue, Interceptor, Mediator};
//!
//! let context = SandboxContext::new(PathNormalizer::new("/srv/app"));
//! context.configure(&ConfigUpdate::new().file_accessdir(["/srv/app"]), false)?;
//!
//! let fs = BindingTable::new()
//!     .with("unlink", |_| Ok(HostValue::Undefined))
//!     .augment(&Interceptor::new(Mediator::new(Arc::new(context))));
//!
//! let err = fs.call("unlink", vec!["/etc/passwd".into()]).unwrap_err();
//! assert_eq!(err.to_string(), "Access denied (file: /etc/passwd)");
//! # Ok::<(), fslock_core::SandboxError>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod binding;
pub mod delivery;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod interceptor;
pub mod mediator;
pub mod module;
pub mod resolver;
#[cfg(unix)]
pub mod std_fs;

pub use binding::{BindingTable, FS_BINDING, ProcessBindings, SealedBindings};
pub use delivery::{Continuation, deliver_error};
pub use descriptor::{Arity, FsOperation, INTERCEPTED_CALLS, InterceptedCall, descriptor};
pub use error::{HostError, HostResult};
pub use host::{Callback, CompletionRequest, HostArgs, HostPrimitive, HostValue};
pub use interceptor::Interceptor;
pub use mediator::Mediator;
pub use module::{GuardedResolver, ModuleLoadGuard, ModuleResolver, NativeTarget};
pub use resolver::SearchPathResolver;
#[cfg(unix)]
pub use std_fs::std_fs_binding;
