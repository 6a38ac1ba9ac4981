//! Named tables of host primitives and the guarded view of them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::descriptor::FsOperation;
use crate::error::{HostError, HostResult};
use crate::host::{HostArgs, HostPrimitive, HostValue};
use crate::interceptor::Interceptor;

/// Name of the binding whose operations are guarded.
pub const FS_BINDING: &str = "fs";

/// A mutable table of primitives, as a host assembles it.
#[derive(Clone, Default)]
pub struct BindingTable {
    primitives: BTreeMap<String, HostPrimitive>,
}

impl BindingTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `primitive` under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, primitive: HostPrimitive) {
        self.primitives.insert(name.into(), primitive);
    }

    /// Builder form of [`Self::insert`] taking a plain closure.
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, primitive: F) -> Self
    where
        F: Fn(HostArgs) -> HostResult<HostValue> + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(primitive));
        self
    }

    /// The primitive registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HostPrimitive> {
        self.primitives.get(name)
    }

    /// Invoke the primitive registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownOperation`] if nothing is registered, or
    /// whatever the primitive returns.
    pub fn call(&self, name: &str, args: HostArgs) -> HostResult<HostValue> {
        call_primitive(&self.primitives, name, args)
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.primitives.keys().map(String::as_str)
    }

    /// Number of registered primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// A plain table is never guarded.
    #[must_use]
    pub fn is_fs_locked(&self) -> bool {
        false
    }

    /// Replace every guarded operation with its wrapped form and freeze the
    /// table. Operations outside the descriptor table pass through.
    #[must_use]
    pub fn augment(self, interceptor: &Interceptor) -> SealedBindings {
        let mut wrapped = 0_usize;
        let primitives = self
            .primitives
            .into_iter()
            .map(|(name, primitive)| match FsOperation::from_name(&name) {
                Some(operation) => {
                    wrapped = wrapped.saturating_add(1);
                    (name, interceptor.wrap(operation, primitive))
                },
                None => (name, primitive),
            })
            .collect();
        info!(wrapped, "filesystem binding locked");
        SealedBindings {
            primitives: Arc::new(primitives),
            fs_locked: true,
        }
    }

    /// Freeze the table without guarding it.
    #[must_use]
    pub fn seal(self) -> SealedBindings {
        SealedBindings {
            primitives: Arc::new(self.primitives),
            fs_locked: false,
        }
    }
}

impl fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingTable")
            .field("operations", &self.primitives.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A frozen table. There is no way to register, replace or remove a
/// primitive once sealed; clones share the same primitives.
#[derive(Clone)]
pub struct SealedBindings {
    primitives: Arc<BTreeMap<String, HostPrimitive>>,
    fs_locked: bool,
}

impl SealedBindings {
    /// The primitive registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HostPrimitive> {
        self.primitives.get(name)
    }

    /// Invoke the primitive registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownOperation`] if nothing is registered, or
    /// whatever the primitive returns, including access denials.
    pub fn call(&self, name: &str, args: HostArgs) -> HostResult<HostValue> {
        call_primitive(&self.primitives, name, args)
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.primitives.keys().map(String::as_str)
    }

    /// True if the filesystem operations of this table are guarded.
    #[must_use]
    pub fn is_fs_locked(&self) -> bool {
        self.fs_locked
    }
}

impl fmt::Debug for SealedBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedBindings")
            .field("operations", &self.primitives.keys().collect::<Vec<_>>())
            .field("fs_locked", &self.fs_locked)
            .finish()
    }
}

fn call_primitive(
    primitives: &BTreeMap<String, HostPrimitive>,
    name: &str,
    args: HostArgs,
) -> HostResult<HostValue> {
    let primitive = primitives
        .get(name)
        .ok_or_else(|| HostError::UnknownOperation(name.to_owned()))?;
    primitive(args)
}

/// The binding registry a host exposes to scripts.
///
/// The `fs` table is guarded when registered; every other table is sealed
/// as is. Lookups strip NUL bytes from the requested name so `"fs\0"`
/// cannot reach an unguarded copy.
#[derive(Debug)]
pub struct ProcessBindings {
    interceptor: Interceptor,
    tables: HashMap<String, SealedBindings>,
}

impl ProcessBindings {
    /// An empty registry guarding through `interceptor`.
    #[must_use]
    pub fn new(interceptor: Interceptor) -> Self {
        Self {
            interceptor,
            tables: HashMap::new(),
        }
    }

    /// Register `table` under `name`.
    pub fn register(&mut self, name: &str, table: BindingTable) {
        let name = strip_nul(name);
        let sealed = if name == FS_BINDING {
            table.augment(&self.interceptor)
        } else {
            table.seal()
        };
        debug!(binding = %name, fs_locked = sealed.is_fs_locked(), "binding registered");
        self.tables.insert(name, sealed);
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with(mut self, name: &str, table: BindingTable) -> Self {
        self.register(name, table);
        self
    }

    /// Look up a binding by name.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::UnknownBinding`] if no table is registered.
    pub fn binding(&self, name: &str) -> HostResult<SealedBindings> {
        let name = strip_nul(name);
        self.tables
            .get(&name)
            .cloned()
            .ok_or(HostError::UnknownBinding(name))
    }
}

fn strip_nul(name: &str) -> String {
    name.chars().filter(|c| *c != '\0').collect()
}
