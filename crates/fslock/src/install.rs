//! Installing the sandbox in a host process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fslock_config::EnvVars;
use fslock_core::{Config, ConfigUpdate, PathNormalizer, SandboxContext, SandboxResult};
use fslock_intercept::{
    BindingTable, Interceptor, Mediator, ModuleLoadGuard, ProcessBindings, SealedBindings,
};
use tracing::info;

use crate::error::{FsLockError, FsLockResult};

/// Where the initial configuration comes from.
#[derive(Debug, Clone, Default)]
enum InitialSource {
    /// Process environment (and the file it names).
    #[default]
    ProcessEnv,
    /// An explicit variable snapshot.
    Vars(EnvVars),
    /// A ready-made configuration; no file or environment is read.
    Config(Config),
}

/// Options for [`FsLock::install`].
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    base_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    source: InitialSource,
}

impl InstallOptions {
    /// Defaults: current directory as base, configuration from the process
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir` instead of the current directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Read this TOML file instead of the one named by `FSLOCK_CONFIG`.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Read variables from `vars` instead of the process environment.
    #[must_use]
    pub fn with_env(mut self, vars: EnvVars) -> Self {
        self.source = InitialSource::Vars(vars);
        self
    }

    /// Start from `config` and skip file and environment loading.
    #[must_use]
    pub fn with_initial_config(mut self, config: Config) -> Self {
        self.source = InitialSource::Config(config);
        self
    }
}

/// An installed sandbox: the policy context plus the guards built on it.
///
/// There is one per process in production; tests create as many as they
/// like since nothing is global.
#[derive(Debug, Clone)]
pub struct FsLock {
    context: Arc<SandboxContext>,
    mediator: Mediator,
    interceptor: Interceptor,
    module_guard: ModuleLoadGuard,
}

impl FsLock {
    /// Capture the base directory, load the initial configuration and build
    /// the guards.
    ///
    /// # Errors
    ///
    /// Returns [`FsLockError::BaseDir`] if the current directory is needed
    /// and unavailable, or [`FsLockError::Config`] if loading fails.
    pub fn install(options: InstallOptions) -> FsLockResult<Self> {
        let normalizer = match &options.base_dir {
            Some(dir) => PathNormalizer::from_path(dir),
            None => PathNormalizer::from_current_dir().map_err(FsLockError::BaseDir)?,
        };

        let file = options.config_file.as_deref();
        let initial = match options.source {
            InitialSource::ProcessEnv => {
                let vars = fslock_config::collect_env_vars()?;
                fslock_config::load(&normalizer, file, &vars)?
            },
            InitialSource::Vars(vars) => fslock_config::load(&normalizer, file, &vars)?,
            InitialSource::Config(config) => config,
        };

        info!(base = normalizer.base(), "installing filesystem sandbox");
        Ok(Self::with_context(Arc::new(SandboxContext::with_config(
            normalizer, initial,
        ))))
    }

    /// Build the guards over an existing context.
    #[must_use]
    pub fn with_context(context: Arc<SandboxContext>) -> Self {
        let mediator = Mediator::new(Arc::clone(&context));
        Self {
            interceptor: Interceptor::new(mediator.clone()),
            module_guard: ModuleLoadGuard::new(mediator.clone()),
            mediator,
            context,
        }
    }

    /// Install or extend the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the lock forbids the change.
    pub fn configure(&self, update: &ConfigUpdate, override_change: bool) -> SandboxResult<()> {
        self.context.configure(update, override_change)
    }

    /// True only if `module` passes both `open_basedir` and `file_accessdir`.
    #[must_use]
    pub fn is_require_allowed(&self, module: &str) -> bool {
        self.context.is_require_allowed(module)
    }

    /// A copy of the current `open_basedir` entries.
    #[must_use]
    pub fn get_allowed_require(&self) -> Vec<String> {
        self.context.allowed_require()
    }

    /// Register binding tables, guarding the `fs` one.
    #[must_use]
    pub fn guard_bindings<'a, I>(&self, tables: I) -> ProcessBindings
    where
        I: IntoIterator<Item = (&'a str, BindingTable)>,
    {
        let registry = ProcessBindings::new(self.interceptor.clone());
        tables
            .into_iter()
            .fold(registry, |bindings, (name, table)| bindings.with(name, table))
    }

    /// Guard a single `fs` table without a registry.
    #[must_use]
    pub fn guard_fs(&self, table: BindingTable) -> SealedBindings {
        table.augment(&self.interceptor)
    }

    /// The module resolution and native load guard.
    #[must_use]
    pub fn module_guard(&self) -> &ModuleLoadGuard {
        &self.module_guard
    }

    /// The hook-point mediator.
    #[must_use]
    pub fn mediator(&self) -> &Mediator {
        &self.mediator
    }

    /// The primitive wrapper.
    #[must_use]
    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    /// The policy context.
    #[must_use]
    pub fn context(&self) -> &Arc<SandboxContext> {
        &self.context
    }

    /// The base directory relative paths resolve against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        Path::new(self.context.normalizer().base())
    }
}
