//! Guards for module resolution and native library loading.

use std::fmt;

use tracing::debug;

use crate::error::HostResult;
use crate::mediator::Mediator;

/// The target of a native library load: a plain path, or a module object
/// carrying a `filename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeTarget {
    /// A path string.
    Path(String),
    /// A module record; its `filename` is what gets loaded.
    Module {
        /// File the module is loaded from.
        filename: String,
    },
}

impl NativeTarget {
    /// The path that is checked and loaded.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Module { filename } => filename,
        }
    }
}

impl From<&str> for NativeTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for NativeTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for NativeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Maps a module request to a file.
///
/// `Ok(None)` means nothing was found; the guard passes that through.
pub trait ModuleResolver {
    /// Resolve `request` using `search_paths`.
    ///
    /// # Errors
    ///
    /// Implementations return whatever their lookup fails with.
    fn resolve(&self, request: &str, search_paths: &[String]) -> HostResult<Option<String>>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&str, &[String]) -> HostResult<Option<String>>,
{
    fn resolve(&self, request: &str, search_paths: &[String]) -> HostResult<Option<String>> {
        self(request, search_paths)
    }
}

/// Applies the policy to resolved module files and native load targets.
#[derive(Debug, Clone)]
pub struct ModuleLoadGuard {
    mediator: Mediator,
}

impl ModuleLoadGuard {
    /// Create a guard deciding through `mediator`.
    #[must_use]
    pub fn new(mediator: Mediator) -> Self {
        Self { mediator }
    }

    /// Resolve `request` with `resolver` and check the file it maps to
    /// against `open_basedir`.
    ///
    /// # Errors
    ///
    /// Returns the resolver's own error unchanged, or an access denial naming
    /// `request` when the resolved file is outside `open_basedir`.
    pub fn find_path<R>(
        &self,
        resolver: &R,
        request: &str,
        search_paths: &[String],
    ) -> HostResult<Option<String>>
    where
        R: ModuleResolver + ?Sized,
    {
        let resolved = resolver.resolve(request, search_paths)?;
        match &resolved {
            Some(path) => self.mediator.before_module_resolve(request, path)?,
            None => debug!(request, "module not found, nothing to check"),
        }
        Ok(resolved)
    }

    /// Wrap `resolver` so every resolution goes through [`Self::find_path`].
    #[must_use]
    pub fn guard_resolver<R>(&self, resolver: R) -> GuardedResolver<R>
    where
        R: ModuleResolver,
    {
        GuardedResolver {
            guard: self.clone(),
            inner: resolver,
        }
    }

    /// Check `target` against `file_accessdir`, then hand it to `loader`.
    ///
    /// # Errors
    ///
    /// Returns an access denial before `loader` runs, or whatever `loader`
    /// returns.
    pub fn dlopen<T, F>(&self, target: &NativeTarget, loader: F) -> HostResult<T>
    where
        F: FnOnce(&NativeTarget) -> HostResult<T>,
    {
        self.mediator.before_native_load(target)?;
        loader(target)
    }

    /// True only if `module` passes both `open_basedir` and `file_accessdir`.
    #[must_use]
    pub fn is_require_allowed(&self, module: &str) -> bool {
        self.mediator.context().is_require_allowed(module)
    }

    /// A copy of the current `open_basedir` entries.
    #[must_use]
    pub fn allowed_require(&self) -> Vec<String> {
        self.mediator.context().allowed_require()
    }
}

/// A resolver whose results are checked against `open_basedir`.
#[derive(Debug, Clone)]
pub struct GuardedResolver<R> {
    guard: ModuleLoadGuard,
    inner: R,
}

impl<R: ModuleResolver> ModuleResolver for GuardedResolver<R> {
    fn resolve(&self, request: &str, search_paths: &[String]) -> HostResult<Option<String>> {
        self.guard.find_path(&self.inner, request, search_paths)
    }
}
