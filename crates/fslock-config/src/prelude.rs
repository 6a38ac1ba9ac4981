//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fslock_config::prelude::*;` to import all essential types.

pub use crate::{ConfigError, ConfigResult, EnvVars, load, load_from_env};
