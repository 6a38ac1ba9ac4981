//! Hook points an embedding host calls before its own primitives.
//!
//! The mediator only decides. Hosts that keep their own calling conventions
//! call the `before_*` hooks directly; hosts that expose positional
//! primitives let the [`Interceptor`](crate::interceptor::Interceptor) call
//! them instead.

use std::sync::Arc;

use fslock_core::{ListName, SandboxContext, SandboxError, SandboxResult};
use tracing::{debug, warn};

use crate::descriptor::FsOperation;
use crate::module::NativeTarget;

/// Policy decisions for filesystem operations, module resolution and
/// native loads, backed by one [`SandboxContext`].
#[derive(Debug, Clone)]
pub struct Mediator {
    context: Arc<SandboxContext>,
}

impl Mediator {
    /// Create a mediator deciding against `context`.
    #[must_use]
    pub fn new(context: Arc<SandboxContext>) -> Self {
        Self { context }
    }

    /// The context decisions are made against.
    #[must_use]
    pub fn context(&self) -> &Arc<SandboxContext> {
        &self.context
    }

    /// Check the path arguments of `operation` against `file_accessdir`.
    ///
    /// Every path is checked against the same snapshot; the error lists only
    /// the denied ones, in argument order.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if any path is denied.
    pub fn before(&self, operation: FsOperation, paths: &[&str]) -> SandboxResult<()> {
        let denied = self.context.denied_paths(paths);

        if denied.is_empty() {
            debug!(%operation, ?paths, "filesystem access permitted");
            return Ok(());
        }

        warn!(%operation, paths = ?denied, "filesystem access denied");
        Err(SandboxError::FileAccessDenied { paths: denied })
    }

    /// Hook for `open`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_open(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Open, &[path])
    }

    /// Hook for `rename`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] naming the denied paths.
    pub fn before_rename(&self, from: &str, to: &str) -> SandboxResult<()> {
        self.before(FsOperation::Rename, &[from, to])
    }

    /// Hook for `rmdir`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_rmdir(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Rmdir, &[path])
    }

    /// Hook for `mkdir`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_mkdir(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Mkdir, &[path])
    }

    /// Hook for `readdir`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_readdir(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Readdir, &[path])
    }

    /// Hook for `symlink`. Both the link target and the link path are
    /// checked as plain paths; the target is never dereferenced.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] naming the denied paths.
    pub fn before_symlink(&self, target: &str, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Symlink, &[target, path])
    }

    /// Hook for `link`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] naming the denied paths.
    pub fn before_link(&self, existing: &str, new: &str) -> SandboxResult<()> {
        self.before(FsOperation::Link, &[existing, new])
    }

    /// Hook for `unlink`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_unlink(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Unlink, &[path])
    }

    /// Hook for `chmod`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_chmod(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Chmod, &[path])
    }

    /// Hook for `chown`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_chown(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Chown, &[path])
    }

    /// Hook for `readlink`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::FileAccessDenied`] if `path` is denied.
    pub fn before_readlink(&self, path: &str) -> SandboxResult<()> {
        self.before(FsOperation::Readlink, &[path])
    }

    /// Hook run after a resolver mapped `request` to the file `resolved`.
    ///
    /// The error names the request, not the resolved location.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::ModuleAccessDenied`] if `resolved` falls
    /// outside `open_basedir`.
    pub fn before_module_resolve(&self, request: &str, resolved: &str) -> SandboxResult<()> {
        if self.context.is_allowed(resolved, ListName::OpenBasedir) {
            debug!(request, resolved, "module resolution permitted");
            return Ok(());
        }

        warn!(request, resolved, "module resolution denied");
        Err(SandboxError::ModuleAccessDenied {
            request: request.to_owned(),
        })
    }

    /// Hook run before a native library is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::NativeModuleAccessDenied`] if the target falls
    /// outside `file_accessdir`.
    pub fn before_native_load(&self, target: &NativeTarget) -> SandboxResult<()> {
        let reference = target.path();
        if self.context.is_access_allowed(reference) {
            debug!(reference, "native load permitted");
            return Ok(());
        }

        warn!(reference, "native load denied");
        Err(SandboxError::NativeModuleAccessDenied {
            reference: reference.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fslock_core::{ConfigUpdate, PathNormalizer};

    fn mediator(update: &ConfigUpdate) -> Mediator {
        let context = SandboxContext::new(PathNormalizer::new("/home/x/project"));
        context.configure(update, false).unwrap();
        Mediator::new(Arc::new(context))
    }

    fn home_only() -> Mediator {
        mediator(&ConfigUpdate::new().file_accessdir(["/home/x/"]))
    }

    #[test]
    fn test_single_path_denial() {
        let err = home_only().before_unlink("/tmp").unwrap_err();
        assert_eq!(err.to_string(), "Access denied (file: /tmp)");
        assert!(home_only().before_unlink("/home/x/file").is_ok());
    }

    #[test]
    fn test_dual_path_lists_only_denied() {
        let m = home_only();
        assert_eq!(
            m.before_rename("/tmp", "/tmp2").unwrap_err().to_string(),
            "Access denied (file: /tmp, /tmp2)"
        );
        assert_eq!(
            m.before_rename("/home/x/sub", "/tmp").unwrap_err().to_string(),
            "Access denied (file: /tmp)"
        );
        assert_eq!(
            m.before_link("/tmp", "/home/x/sub").unwrap_err().to_string(),
            "Access denied (file: /tmp)"
        );
        assert!(m.before_symlink("/home/x/a", "/home/x/b").is_ok());
    }

    #[test]
    fn test_every_hook_checks_its_path() {
        let m = home_only();
        let hooks: [fn(&Mediator, &str) -> SandboxResult<()>; 8] = [
            Mediator::before_open,
            Mediator::before_rmdir,
            Mediator::before_mkdir,
            Mediator::before_readdir,
            Mediator::before_unlink,
            Mediator::before_chmod,
            Mediator::before_chown,
            Mediator::before_readlink,
        ];
        for hook in hooks {
            assert!(hook(&m, "/etc/passwd").is_err());
            assert!(hook(&m, "/home/x/notes.txt").is_ok());
        }
    }

    #[test]
    fn test_module_denial_names_request() {
        let m = mediator(&ConfigUpdate::new().open_basedir(["/home/x/project/lib"]));
        let err = m
            .before_module_resolve("../package.json", "/home/x/package.json")
            .unwrap_err();
        assert_eq!(err.to_string(), "Access denied (module: ../package.json)");
        assert!(
            m.before_module_resolve("./util", "/home/x/project/lib/util.js")
                .is_ok()
        );
    }

    #[test]
    fn test_native_load() {
        let m = home_only();
        let err = m
            .before_native_load(&NativeTarget::from("/opt/addon.node"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Access denied (native module: /opt/addon.node)");

        let inside = NativeTarget::Module {
            filename: "/home/x/addon.node".into(),
        };
        assert!(m.before_native_load(&inside).is_ok());
    }

    #[test]
    fn test_scheme_paths_are_denied_even_when_unconfigured() {
        let context = SandboxContext::new(PathNormalizer::new("/"));
        let m = Mediator::new(Arc::new(context));
        assert!(m.before_open("https://example.com/x").is_err());
        assert!(m.before_open("/anything").is_ok());
    }
}
