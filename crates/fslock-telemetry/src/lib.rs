//! fslock telemetry - logging setup for hosts embedding the sandbox.
//!
//! The sandbox crates only emit `tracing` events: `debug` for individual
//! checks, `warn` for denials and the override escape hatch, `info` for
//! installation and configuration. This crate installs a subscriber for
//! them.
//!
//! # Example
//!
//! ```rust,no_run
//! use fslock_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), fslock_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("fslock_intercept=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("sandbox logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    ENV_LOG, ENV_LOG_FORMAT, LogConfig, LogFormat, LogTarget, setup_default_logging,
    setup_logging,
};
