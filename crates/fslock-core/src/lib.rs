//! fslock core - the policy engine behind the in-process filesystem sandbox.
//!
//! This crate decides; it never touches the filesystem. It provides:
//!
//! - [`PathNormalizer`]: lexical normalization against a fixed base directory
//! - the allowlist matcher ([`matcher::is_allowed`], [`matcher::find_match`])
//! - [`Config`] / [`ConfigUpdate`] and the merge rules ([`resolve_list`],
//!   [`resolve_config`])
//! - [`LockState`] and the one-shot lock rule ([`verify_config`])
//! - [`SandboxContext`], which ties them together behind `configure`
//!
//! # Example
//!
//! ```rust
//! use fslock_core::{ConfigUpdate, PathNormalizer, SandboxContext};
//!
//! let ctx = SandboxContext::new(PathNormalizer::new("/srv/app"));
//! ctx.configure(&ConfigUpdate::new().file_accessdir(["/srv/app"]), false)?;
//!
//! assert!(ctx.is_access_allowed("data/report.csv"));
//! assert!(!ctx.is_access_allowed("/etc/passwd"));
//! # Ok::<(), fslock_core::SandboxError>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod config;
pub mod context;
pub mod error;
pub mod lock;
pub mod matcher;
pub mod path;

pub use config::{Config, ConfigUpdate, resolve_config, resolve_list, split_list};
pub use context::SandboxContext;
pub use error::{SandboxError, SandboxResult};
pub use lock::{LockState, verify_config};
pub use matcher::ListName;
pub use path::PathNormalizer;
