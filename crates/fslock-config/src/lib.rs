//! fslock config - initial sandbox configuration.
//!
//! Read once at process start, before any programmatic `configure` call.
//! Lists come from an optional TOML file and from two environment
//! variables, each a single path or a colon-separated list:
//!
//! ```text
//! FSLOCK_FILE_ACCESSDIR=/srv/app:/tmp
//! FSLOCK_OPEN_BASEDIR=/srv/app/modules
//! FSLOCK_CONFIG=/etc/fslock.toml
//! ```
//!
//! `NODEJS_FILE_ACCESSDIR` and `NODEJS_OPEN_BASEDIR` are accepted as
//! fallbacks for the two list variables.
//!
//! ```toml
//! [sandbox]
//! file_accessdir = ["/srv/app"]
//! open_basedir = ["/srv/app/modules"]
//! ```
//!
//! The result seeds [`fslock_core::SandboxContext::with_config`].

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod env;
pub mod error;
pub mod loader;
pub mod validate;

pub use env::{
    ENV_CONFIG, ENV_FILE_ACCESSDIR, ENV_OPEN_BASEDIR, EnvVars, LEGACY_ENV_FILE_ACCESSDIR,
    LEGACY_ENV_OPEN_BASEDIR, collect_env_vars,
};
pub use error::{ConfigError, ConfigResult};
pub use loader::{MAX_CONFIG_FILE_SIZE, SandboxSection, load, load_file, load_from_env};
pub use validate::validate_entries;
