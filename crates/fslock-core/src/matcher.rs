//! Prefix allowlist matching.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::path::{PathNormalizer, SEPARATOR};

/// Scheme prefixes that are never treated as local paths.
const BLOCKED_SCHEMES: &[&str] = &["http:", "https:"];

/// The two named allowlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListName {
    /// Directories filesystem operations and native loads may touch.
    #[serde(rename = "file_accessdir")]
    FileAccessDir,
    /// Directories modules may be resolved from.
    #[serde(rename = "open_basedir")]
    OpenBasedir,
}

impl ListName {
    /// Both lists, in the order configuration resolves them.
    pub const ALL: [Self; 2] = [Self::OpenBasedir, Self::FileAccessDir];

    /// The configuration key for this list.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileAccessDir => "file_accessdir",
            Self::OpenBasedir => "open_basedir",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `path` carries a scheme that must never match.
#[must_use]
pub fn is_scheme_url(path: &str) -> bool {
    BLOCKED_SCHEMES.iter().any(|scheme| path.starts_with(scheme))
}

/// Find the first entry of `entries` that admits `path`.
///
/// `path` is normalized first; entries are expected to be normalized
/// already but a bare entry without a trailing separator still only matches
/// at a component boundary.
#[must_use]
pub fn find_match<'a>(
    normalizer: &PathNormalizer,
    path: &str,
    entries: &'a [String],
) -> Option<&'a str> {
    if is_scheme_url(path) {
        return None;
    }

    let normalized = normalizer.normalize(path);
    entries
        .iter()
        .map(String::as_str)
        .find(|dir| prefix_matches(&normalized, dir))
}

/// Returns `true` if any entry of `entries` admits `path`.
#[must_use]
pub fn is_allowed(normalizer: &PathNormalizer, path: &str, entries: &[String]) -> bool {
    find_match(normalizer, path, entries).is_some()
}

fn prefix_matches(path: &str, dir: &str) -> bool {
    let Some(rest) = path.strip_prefix(dir) else {
        return false;
    };
    dir.ends_with(SEPARATOR) || rest.is_empty() || rest.starts_with(SEPARATOR)
}
