//! Outcome delivery through the caller's own calling convention.
//!
//! A primitive may be invoked synchronously, with a callback, or with a
//! completion object. The continuation argument sits at a fixed position
//! given by the operation's descriptor; its variant decides how the outcome
//! travels back. A synchronous call never turns into an asynchronous failure
//! and the other way round.

use std::{fmt, mem};

use crate::descriptor::InterceptedCall;
use crate::error::{HostError, HostResult};
use crate::host::{Callback, CompletionRequest, HostArgs, HostValue};

/// The continuation found at an operation's continuation position.
pub enum Continuation {
    /// No continuation: the outcome is returned to the caller.
    Sync,
    /// A callable continuation.
    Callback(Callback),
    /// A completion object, with or without a handler.
    Request(CompletionRequest),
    /// Some other value sat in the continuation slot.
    Other(HostValue),
}

impl Continuation {
    /// Remove the continuation of `call` from `args`.
    ///
    /// The slot is left as [`HostValue::Undefined`]; positions of the other
    /// arguments are unchanged.
    pub fn take(args: &mut HostArgs, call: &InterceptedCall) -> Self {
        Self::take_at(args, call.continuation_index())
    }

    /// Remove the continuation at 0-based `index`.
    pub fn take_at(args: &mut HostArgs, index: usize) -> Self {
        match args.get_mut(index).map(mem::take) {
            None | Some(HostValue::Undefined) => Self::Sync,
            Some(HostValue::Callback(cb)) => Self::Callback(cb),
            Some(HostValue::Request(req)) => Self::Request(req),
            Some(other) => Self::Other(other),
        }
    }

    /// True when the outcome goes straight back to the caller.
    #[must_use]
    pub fn is_sync(&self) -> bool {
        !matches!(
            self,
            Self::Callback(_)
                | Self::Request(CompletionRequest {
                    oncomplete: Some(_)
                })
        )
    }

    /// Deliver `outcome`.
    ///
    /// A callback or completion handler receives it and the call itself
    /// returns [`HostValue::Undefined`]; otherwise the outcome is returned,
    /// so an error is raised synchronously.
    ///
    /// # Errors
    ///
    /// Returns `outcome`'s error when there is no continuation to receive it.
    pub fn complete(self, outcome: HostResult<HostValue>) -> HostResult<HostValue> {
        match self {
            Self::Callback(cb) => {
                cb(outcome);
                Ok(HostValue::Undefined)
            },
            Self::Request(CompletionRequest {
                oncomplete: Some(handler),
            }) => {
                handler(outcome);
                Ok(HostValue::Undefined)
            },
            Self::Sync | Self::Request(_) | Self::Other(_) => outcome,
        }
    }

    /// Deliver a failure. Shorthand for `complete(Err(err))`.
    ///
    /// # Errors
    ///
    /// Returns `err` when there is no continuation to receive it.
    pub fn fail(self, err: impl Into<HostError>) -> HostResult<HostValue> {
        self.complete(Err(err.into()))
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => f.write_str("Sync"),
            Self::Callback(_) => f.write_str("Callback"),
            Self::Request(req) => f.debug_tuple("Request").field(req).finish(),
            Self::Other(value) => f.debug_tuple("Other").field(value).finish(),
        }
    }
}

/// Deliver `err` through whatever convention the caller used for `call`.
///
/// # Errors
///
/// Returns `err` when the call was synchronous or the continuation slot
/// holds nothing that can receive it.
pub fn deliver_error(
    call: &InterceptedCall,
    args: &mut HostArgs,
    err: impl Into<HostError>,
) -> HostResult<HostValue> {
    Continuation::take(args, call).fail(err)
}
