//! The fixed table of intercepted filesystem operations.
//!
//! The operation set is known in advance, so the shape of every wrapper is
//! decided here rather than discovered from the arguments of each call.

use std::fmt;

/// How many path arguments an operation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The first argument is a path.
    Single,
    /// The first two arguments are paths (source, destination).
    Dual,
}

impl Arity {
    /// Number of leading path arguments.
    #[must_use]
    pub const fn path_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Dual => 2,
        }
    }
}

/// Static metadata for one wrapped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptedCall {
    /// Operation name, as registered in a binding table.
    pub name: &'static str,
    /// Path arguments checked.
    pub arity: Arity,
    /// 1-based position of the continuation argument.
    pub continuation: usize,
}

impl InterceptedCall {
    /// 0-based index of the continuation argument.
    #[must_use]
    pub const fn continuation_index(&self) -> usize {
        self.continuation.saturating_sub(1)
    }
}

/// Every filesystem operation the mediator guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsOperation {
    /// Open a file.
    Open,
    /// Rename a path.
    Rename,
    /// Remove a directory.
    Rmdir,
    /// Create a directory.
    Mkdir,
    /// List a directory.
    Readdir,
    /// Create a symbolic link.
    Symlink,
    /// Create a hard link.
    Link,
    /// Remove a file.
    Unlink,
    /// Change permissions.
    Chmod,
    /// Change ownership.
    Chown,
    /// Read a symbolic link.
    Readlink,
}

impl FsOperation {
    /// All guarded operations, in table order.
    pub const ALL: [Self; 11] = [
        Self::Open,
        Self::Rename,
        Self::Rmdir,
        Self::Mkdir,
        Self::Readdir,
        Self::Symlink,
        Self::Link,
        Self::Unlink,
        Self::Chmod,
        Self::Chown,
        Self::Readlink,
    ];

    /// The descriptor for this operation.
    #[must_use]
    pub fn descriptor(self) -> &'static InterceptedCall {
        &INTERCEPTED_CALLS[self as usize]
    }

    /// Operation name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look up an operation by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for FsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const fn call(name: &'static str, arity: Arity, continuation: usize) -> InterceptedCall {
    InterceptedCall {
        name,
        arity,
        continuation,
    }
}

/// The descriptor table, indexed by [`FsOperation`] discriminant.
pub static INTERCEPTED_CALLS: [InterceptedCall; 11] = [
    call("open", Arity::Single, 4),
    call("rename", Arity::Dual, 3),
    call("rmdir", Arity::Single, 2),
    call("mkdir", Arity::Single, 3),
    call("readdir", Arity::Single, 2),
    call("symlink", Arity::Dual, 4),
    call("link", Arity::Dual, 3),
    call("unlink", Arity::Single, 2),
    call("chmod", Arity::Single, 3),
    call("chown", Arity::Single, 4),
    call("readlink", Arity::Single, 2),
];

/// The descriptor for `name`, if the operation is guarded.
#[must_use]
pub fn descriptor(name: &str) -> Option<&'static InterceptedCall> {
    INTERCEPTED_CALLS.iter().find(|call| call.name == name)
}
