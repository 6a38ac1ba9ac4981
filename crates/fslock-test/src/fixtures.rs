//! Sandboxes rooted in a temporary directory.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use fslock_core::{ConfigUpdate, PathNormalizer, SandboxContext};
use fslock_intercept::{BindingTable, Interceptor, Mediator, ModuleLoadGuard, SealedBindings};
use tempfile::TempDir;

/// Directory granted to filesystem operations by [`TestSandbox::new`].
pub const ALLOWED_DIR: &str = "allowed";
/// Directory granted to module resolution by [`TestSandbox::new`].
pub const MODULES_DIR: &str = "allowed/modules";
/// Directory outside every list.
pub const DENIED_DIR: &str = "denied";

/// A sandbox context whose base directory is a fresh temporary directory.
///
/// The layout is:
///
/// ```text
/// <root>/allowed/          file_accessdir
/// <root>/allowed/modules/  open_basedir
/// <root>/denied/
/// ```
///
/// The directory is removed when the sandbox is dropped.
#[derive(Debug)]
pub struct TestSandbox {
    dir: TempDir,
    context: Arc<SandboxContext>,
}

impl TestSandbox {
    /// Create the layout and configure both lists (arming the lock).
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        let sandbox = Self::unconfigured()?;
        let update = ConfigUpdate::new()
            .file_accessdir([sandbox.path(ALLOWED_DIR)])
            .open_basedir([sandbox.path(MODULES_DIR)]);
        sandbox
            .context
            .configure(&update, false)
            .map_err(io::Error::other)?;
        Ok(sandbox)
    }

    /// Create the layout but leave the policy at its defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn unconfigured() -> io::Result<Self> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join(MODULES_DIR))?;
        fs::create_dir_all(dir.path().join(DENIED_DIR))?;
        let context = Arc::new(SandboxContext::new(PathNormalizer::from_path(dir.path())));
        Ok(Self { dir, context })
    }

    /// The temporary root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `rel` joined onto the root, as a string.
    #[must_use]
    pub fn path(&self, rel: &str) -> String {
        self.dir.path().join(rel).to_string_lossy().into_owned()
    }

    /// A path under the granted directory.
    #[must_use]
    pub fn allowed(&self, rel: &str) -> String {
        self.path(&format!("{ALLOWED_DIR}/{rel}"))
    }

    /// A path under the module directory.
    #[must_use]
    pub fn module(&self, rel: &str) -> String {
        self.path(&format!("{MODULES_DIR}/{rel}"))
    }

    /// A path outside every list.
    #[must_use]
    pub fn denied(&self, rel: &str) -> String {
        self.path(&format!("{DENIED_DIR}/{rel}"))
    }

    /// The policy context.
    #[must_use]
    pub fn context(&self) -> &Arc<SandboxContext> {
        &self.context
    }

    /// A mediator over the context.
    #[must_use]
    pub fn mediator(&self) -> Mediator {
        Mediator::new(Arc::clone(&self.context))
    }

    /// An interceptor over the context.
    #[must_use]
    pub fn interceptor(&self) -> Interceptor {
        Interceptor::new(self.mediator())
    }

    /// A module load guard over the context.
    #[must_use]
    pub fn module_guard(&self) -> ModuleLoadGuard {
        ModuleLoadGuard::new(self.mediator())
    }

    /// Guard `table` as the `fs` binding.
    #[must_use]
    pub fn guard(&self, table: BindingTable) -> SealedBindings {
        table.augment(&self.interceptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_and_lists() {
        let sandbox = TestSandbox::new().unwrap();
        assert!(sandbox.root().join(MODULES_DIR).is_dir());
        assert!(sandbox.root().join(DENIED_DIR).is_dir());

        let context = sandbox.context();
        assert!(context.is_access_allowed(&sandbox.allowed("a.txt")));
        assert!(!context.is_access_allowed(&sandbox.denied("a.txt")));
        assert!(context.is_require_allowed(&sandbox.module("m.js")));
        assert!(!context.is_require_allowed(&sandbox.allowed("m.js")));
    }

    #[test]
    fn test_unconfigured_is_open() {
        let sandbox = TestSandbox::unconfigured().unwrap();
        assert!(sandbox.context().is_access_allowed(&sandbox.denied("x")));
        assert!(!sandbox.context().lock_state().armed);
    }
}
