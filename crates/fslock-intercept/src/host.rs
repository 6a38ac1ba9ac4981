//! Values crossing the boundary between an embedding host and its primitives.
//!
//! Host primitives take a positional argument list, the way script-engine
//! bindings marshal calls. Continuations travel in that list as tagged
//! variants, so the wrapper never has to sniff an argument's type.

use std::fmt;
use std::sync::Arc;

use crate::error::HostResult;

/// An asynchronous-callback continuation. Receives the outcome exactly once.
pub type Callback = Box<dyn FnOnce(HostResult<HostValue>) + Send>;

/// A primitive operation as the host exposes it.
pub type HostPrimitive = Arc<dyn Fn(HostArgs) -> HostResult<HostValue> + Send + Sync>;

/// Positional arguments of a host call.
pub type HostArgs = Vec<HostValue>;

/// A completion object: the lower-level convention where the outcome is
/// delivered through a handler field rather than by calling the argument.
#[derive(Default)]
pub struct CompletionRequest {
    /// The completion handler, if the object carries one.
    pub oncomplete: Option<Callback>,
}

impl CompletionRequest {
    /// A request whose handler receives the outcome.
    pub fn new(oncomplete: impl FnOnce(HostResult<HostValue>) + Send + 'static) -> Self {
        Self {
            oncomplete: Some(Box::new(oncomplete)),
        }
    }

    /// A request object with no handler attached.
    #[must_use]
    pub fn without_handler() -> Self {
        Self { oncomplete: None }
    }
}

impl fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("oncomplete", &self.oncomplete.is_some())
            .finish()
    }
}

/// One positional argument or return value.
#[derive(Default)]
pub enum HostValue {
    /// Absent argument or empty result.
    #[default]
    Undefined,
    /// Boolean.
    Bool(bool),
    /// Integer (modes, flags, ids).
    Int(i64),
    /// String (paths, names).
    Str(String),
    /// Raw bytes; paths given as bytes are read lossily.
    Bytes(Vec<u8>),
    /// A list of values (directory listings).
    List(Vec<HostValue>),
    /// An open file.
    File(std::fs::File),
    /// A callable continuation.
    Callback(Callback),
    /// A completion object.
    Request(CompletionRequest),
}

impl HostValue {
    /// Wrap a closure as a callback continuation.
    pub fn callback(f: impl FnOnce(HostResult<HostValue>) + Send + 'static) -> Self {
        Self::Callback(Box::new(f))
    }

    /// Wrap a closure as a completion object's handler.
    pub fn request(f: impl FnOnce(HostResult<HostValue>) + Send + 'static) -> Self {
        Self::Request(CompletionRequest::new(f))
    }

    /// The value as a path string, if it can be one.
    #[must_use]
    pub fn as_path(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
            _ => None,
        }
    }

    /// The value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as an integer.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// True for [`HostValue::Undefined`].
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for HostValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::File(file) => f.debug_tuple("File").field(file).finish(),
            Self::Callback(_) => f.write_str("Callback"),
            Self::Request(req) => fmt::Debug::fmt(req, f),
        }
    }
}
