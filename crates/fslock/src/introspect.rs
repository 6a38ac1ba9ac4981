//! Raw policy functions for tests and diagnostics.
//!
//! Not part of the production surface: hosts use [`FsLock`](crate::FsLock).

use fslock_core::matcher;

pub use fslock_core::{resolve_config, resolve_list, verify_config};

use crate::PathNormalizer;

/// Normalize `path` against the normalizer's base directory.
#[must_use]
pub fn normalize_path(normalizer: &PathNormalizer, path: &str) -> String {
    normalizer.normalize(path)
}

/// Check `path` against an explicit list of entries.
#[must_use]
pub fn is_access_allowed(normalizer: &PathNormalizer, path: &str, entries: &[String]) -> bool {
    matcher::is_allowed(normalizer, path, entries)
}
