//! Lexical path normalization against a fixed base directory.
//!
//! Relative paths are resolved against the base captured when the sandbox was
//! created, never against the working directory at call time, so a script
//! cannot widen its reach by changing directory. No filesystem access happens
//! here: symlinks are not followed and missing paths normalize just the same.

use std::io;
use std::path::Path;

/// Path separator used by the policy. Entries and normalized paths always use it.
pub const SEPARATOR: char = '/';

/// Canonicalizes path strings into absolute, separator-terminated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    base: String,
}

impl PathNormalizer {
    /// Create a normalizer resolving relative paths against `base`.
    ///
    /// A relative `base` is itself anchored at the root.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let anchored = if base.starts_with(SEPARATOR) {
            base
        } else {
            format!("{SEPARATOR}{base}")
        };
        Self {
            base: collapse(&anchored),
        }
    }

    /// Capture the process working directory as the base.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_current_dir() -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::from_path(&cwd))
    }

    /// Create a normalizer from a filesystem path (lossy for non UTF-8 names).
    #[must_use]
    pub fn from_path(base: &Path) -> Self {
        Self::new(base.to_string_lossy().into_owned())
    }

    /// The base directory, normalized and separator-terminated.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Normalize `path` to an absolute, separator-terminated string.
    ///
    /// `.` and `..` segments are collapsed and repeated separators merged;
    /// `..` at the root stays at the root.
    #[must_use]
    pub fn normalize(&self, path: &str) -> String {
        if path.starts_with(SEPARATOR) {
            collapse(path)
        } else {
            collapse(&format!("{}{path}", self.base))
        }
    }
}

fn collapse(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }

    let mut out = String::with_capacity(path.len().saturating_add(1));
    out.push(SEPARATOR);
    for segment in segments {
        out.push_str(segment);
        out.push(SEPARATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_gets_trailing_separator() {
        let n = PathNormalizer::new("/srv/app");
        assert_eq!(n.normalize("/tmp"), "/tmp/");
        assert_eq!(n.normalize("/tmp/"), "/tmp/");
        assert_eq!(n.normalize("/"), "/");
    }

    #[test]
    fn test_relative_uses_base_not_cwd() {
        let n = PathNormalizer::new("/srv/app");
        assert_eq!(n.normalize("lib/index/foo"), "/srv/app/lib/index/foo/");
        assert_eq!(n.normalize("./lib"), "/srv/app/lib/");
        assert_eq!(n.normalize(""), "/srv/app/");
    }

    #[test]
    fn test_dot_segments_collapse() {
        let n = PathNormalizer::new("/srv/app");
        assert_eq!(n.normalize("../package.json"), "/srv/package.json/");
        assert_eq!(n.normalize("/a/./b/../c//d"), "/a/c/d/");
        assert_eq!(n.normalize("/../../etc"), "/etc/");
        assert_eq!(n.normalize("../../../../.."), "/");
    }

    #[test]
    fn test_base_is_normalized() {
        let n = PathNormalizer::new("/srv//app/./");
        assert_eq!(n.base(), "/srv/app/");

        let relative = PathNormalizer::new("srv");
        assert_eq!(relative.base(), "/srv/");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = PathNormalizer::new("/base");
        for raw in ["/tmp", "x/y/../z", "/a/b/", "."] {
            let once = n.normalize(raw);
            assert_eq!(n.normalize(&once), once);
        }
    }
}
