//! Allowlist configuration and the merge rules applied on every update.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::matcher::ListName;
use crate::path::PathNormalizer;

/// Separator between entries of a joined list (`/a:/b`).
pub const LIST_SEPARATOR: char = ':';

/// What an unconfigured list reads as: the whole filesystem.
static UNSET_LIST: LazyLock<Vec<String>> = LazyLock::new(|| vec!["/".to_owned()]);

/// The two named allowlists.
///
/// A list that has never been configured is `None` and reads as `["/"]`.
/// Instances are immutable once published; every update produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directories filesystem operations and native loads may touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_accessdir: Option<Vec<String>>,
    /// Directories modules may be resolved from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_basedir: Option<Vec<String>>,
}

impl Config {
    /// The effective entries of a list, substituting the default when unset.
    #[must_use]
    pub fn entries(&self, name: ListName) -> &[String] {
        self.configured(name).unwrap_or(UNSET_LIST.as_slice())
    }

    /// The entries of a list only if it has been configured.
    #[must_use]
    pub fn configured(&self, name: ListName) -> Option<&[String]> {
        match name {
            ListName::FileAccessDir => self.file_accessdir.as_deref(),
            ListName::OpenBasedir => self.open_basedir.as_deref(),
        }
    }

    /// Replace one list.
    pub fn set(&mut self, name: ListName, entries: Vec<String>) {
        match name {
            ListName::FileAccessDir => self.file_accessdir = Some(entries),
            ListName::OpenBasedir => self.open_basedir = Some(entries),
        }
    }

    /// Builder form of [`Config::set`].
    #[must_use]
    pub fn with_list(mut self, name: ListName, entries: Vec<String>) -> Self {
        self.set(name, entries);
        self
    }

    /// A copy with every configured entry normalized against `normalizer`.
    ///
    /// Blank entries are dropped. A configured list stays configured even
    /// when nothing is left in it, so it denies everything rather than
    /// falling back to `/`.
    #[must_use]
    pub fn normalized(&self, normalizer: &PathNormalizer) -> Self {
        let mut next = Self::default();
        for name in ListName::ALL {
            if let Some(entries) = self.configured(name) {
                next.set(name, resolve_list(normalizer, &[], entries.iter().map(Some)));
            }
        }
        next
    }
}

/// A requested change, as handed to `configure`.
///
/// Entries may be missing (`None`) or blank; both are dropped during
/// resolution. A list that is `None` contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// New `file_accessdir` entries.
    #[serde(default)]
    pub file_accessdir: Option<Vec<Option<String>>>,
    /// New `open_basedir` entries.
    #[serde(default)]
    pub open_basedir: Option<Vec<Option<String>>>,
}

impl ConfigUpdate {
    /// An update that touches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `file_accessdir` entries.
    #[must_use]
    pub fn file_accessdir<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_accessdir = Some(entries.into_iter().map(|s| Some(s.into())).collect());
        self
    }

    /// Set the `open_basedir` entries.
    #[must_use]
    pub fn open_basedir<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.open_basedir = Some(entries.into_iter().map(|s| Some(s.into())).collect());
        self
    }

    /// Set the `file_accessdir` entries from a colon-joined list (`/a:/b`).
    #[must_use]
    pub fn file_accessdir_joined(self, joined: &str) -> Self {
        self.file_accessdir(split_list(joined))
    }

    /// Set the `open_basedir` entries from a colon-joined list (`/a:/b`).
    #[must_use]
    pub fn open_basedir_joined(self, joined: &str) -> Self {
        self.open_basedir(split_list(joined))
    }

    /// The raw entries supplied for one list.
    #[must_use]
    pub fn list(&self, name: ListName) -> &[Option<String>] {
        let list = match name {
            ListName::FileAccessDir => &self.file_accessdir,
            ListName::OpenBasedir => &self.open_basedir,
        };
        list.as_deref().unwrap_or_default()
    }
}

/// Split a joined list (`/a:/b`) into its raw entries.
pub fn split_list(joined: &str) -> impl Iterator<Item = &str> {
    joined.split(LIST_SEPARATOR)
}

/// Append the valid entries of `incoming` to `existing`.
///
/// Each incoming entry is trimmed; missing and blank entries are dropped and
/// the rest normalized. `existing` is copied as is. Nothing is deduplicated.
#[must_use]
pub fn resolve_list<I, S>(
    normalizer: &PathNormalizer,
    existing: &[String],
    incoming: I,
) -> Vec<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut resolved = existing.to_vec();
    resolved.extend(incoming.into_iter().flatten().filter_map(|entry| {
        let trimmed = entry.as_ref().trim();
        (!trimmed.is_empty()).then(|| normalizer.normalize(trimmed))
    }));
    resolved
}

/// Merge `update` into `current`, producing the next configuration.
///
/// With `overwrite`, both lists start empty instead of from `current`.
/// Both lists are always resolved, so the result has every list configured.
#[must_use]
pub fn resolve_config(
    normalizer: &PathNormalizer,
    update: &ConfigUpdate,
    current: &Config,
    overwrite: bool,
) -> Config {
    let mut next = Config::default();
    for name in ListName::ALL {
        let base = if overwrite {
            &[][..]
        } else {
            current.configured(name).unwrap_or_default()
        };
        let incoming = update.list(name).iter().map(Option::as_deref);
        next.set(name, resolve_list(normalizer, base, incoming));
    }
    next
}
