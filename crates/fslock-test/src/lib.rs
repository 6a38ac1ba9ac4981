//! fslock Test - Shared test utilities for the filesystem sandbox.
//!
//! Fixtures and recording doubles usable from any fslock crate as a
//! dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! fslock-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use fslock_test::{CallbackProbe, RecordingBinding, TestSandbox};
//!
//! #[test]
//! fn test_denied_unlink() {
//!     let sandbox = TestSandbox::new().unwrap();
//!     let recorder = RecordingBinding::new();
//!     let fs = sandbox.guard(recorder.table());
//!
//!     let probe = CallbackProbe::new();
//!     fs.call("unlink", vec![sandbox.denied("x").into(), probe.callback()]).unwrap();
//!
//!     assert!(probe.error_message().unwrap().starts_with("Access denied"));
//!     assert_eq!(recorder.count(), 0);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
