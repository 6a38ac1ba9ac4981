//! The sandbox context: configuration snapshot plus lock state.

use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use crate::config::{Config, ConfigUpdate, resolve_config};
use crate::error::SandboxResult;
use crate::lock::LockState;
use crate::matcher::{self, ListName};
use crate::path::PathNormalizer;

/// Owns the policy for one process: the base directory, the current
/// configuration snapshot and the lock.
///
/// Readers always see a complete snapshot. `configure` is the only writer
/// and publishes a new snapshot rather than editing the old one.
#[derive(Debug)]
pub struct SandboxContext {
    normalizer: PathNormalizer,
    config: ArcSwap<Config>,
    lock: Mutex<LockState>,
}

impl SandboxContext {
    /// Create a context with the default (unconfigured) lists.
    #[must_use]
    pub fn new(normalizer: PathNormalizer) -> Self {
        Self::with_config(normalizer, Config::default())
    }

    /// Create a context seeded with an initial configuration, typically the
    /// one read from the environment at startup.
    ///
    /// Seeding does not count as a `configure` call. Seeded entries are
    /// normalized like configured ones; see [`Config::normalized`].
    #[must_use]
    pub fn with_config(normalizer: PathNormalizer, initial: Config) -> Self {
        let initial = initial.normalized(&normalizer);
        Self {
            normalizer,
            config: ArcSwap::from_pointee(initial),
            lock: Mutex::new(LockState::new()),
        }
    }

    /// The normalizer bound to the base directory captured at creation.
    #[must_use]
    pub fn normalizer(&self) -> &PathNormalizer {
        &self.normalizer
    }

    /// The current configuration snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// A copy of the lock flags.
    #[must_use]
    pub fn lock_state(&self) -> LockState {
        *self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install or extend the configuration.
    ///
    /// Lists are appended to the existing ones unless the call runs with
    /// change permission granted, in which case they replace them.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the lock forbids the change; the
    /// current snapshot is left untouched.
    pub fn configure(&self, update: &ConfigUpdate, override_change: bool) -> SandboxResult<()> {
        let mut lock = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let overwrite = lock.advance(override_change)?;

        let current = self.config.load();
        let next = resolve_config(&self.normalizer, update, &current, overwrite);
        info!(
            file_accessdir = ?next.entries(ListName::FileAccessDir),
            open_basedir = ?next.entries(ListName::OpenBasedir),
            overwrite,
            "sandbox configuration installed"
        );
        self.config.store(Arc::new(next));
        Ok(())
    }

    /// Check `path` against the named list.
    #[must_use]
    pub fn is_allowed(&self, path: &str, list: ListName) -> bool {
        self.matching_entry(path, list).is_some()
    }

    /// The first entry of the named list that admits `path`.
    #[must_use]
    pub fn matching_entry(&self, path: &str, list: ListName) -> Option<String> {
        let config = self.config.load();
        let found = matcher::find_match(&self.normalizer, path, config.entries(list));
        debug!(path, %list, matched = ?found, "allowlist check");
        found.map(ToOwned::to_owned)
    }

    /// Check `path` against `file_accessdir`.
    #[must_use]
    pub fn is_access_allowed(&self, path: &str) -> bool {
        self.is_allowed(path, ListName::FileAccessDir)
    }

    /// The members of `paths` outside `file_accessdir`, in order.
    ///
    /// All paths are judged against the same snapshot.
    #[must_use]
    pub fn denied_paths(&self, paths: &[&str]) -> Vec<String> {
        let config = self.config.load();
        let entries = config.entries(ListName::FileAccessDir);
        paths
            .iter()
            .filter(|path| !matcher::is_allowed(&self.normalizer, path, entries))
            .map(ToString::to_string)
            .collect()
    }

    /// True only if `module` passes both `open_basedir` and `file_accessdir`
    /// of one snapshot.
    #[must_use]
    pub fn is_require_allowed(&self, module: &str) -> bool {
        let config = self.config.load();
        ListName::ALL
            .into_iter()
            .all(|list| matcher::is_allowed(&self.normalizer, module, config.entries(list)))
    }

    /// A copy of the current `open_basedir` entries.
    #[must_use]
    pub fn allowed_require(&self) -> Vec<String> {
        self.config.load().entries(ListName::OpenBasedir).to_vec()
    }
}
