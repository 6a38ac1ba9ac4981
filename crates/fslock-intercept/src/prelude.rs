//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fslock_intercept::prelude::*;` to import all essential types.

// Errors
pub use crate::{HostError, HostResult};

// Host boundary
pub use crate::{BindingTable, HostArgs, HostPrimitive, HostValue, ProcessBindings, SealedBindings};

// Decisions
pub use crate::{FsOperation, Interceptor, Mediator, ModuleLoadGuard, ModuleResolver, NativeTarget};
