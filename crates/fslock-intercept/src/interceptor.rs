//! Policy-checked wrappers for positional host primitives.

use std::sync::Arc;

use tracing::trace;

use crate::delivery::deliver_error;
use crate::descriptor::{Arity, FsOperation};
use crate::error::{HostError, HostResult};
use crate::host::{HostArgs, HostPrimitive, HostValue};
use crate::mediator::Mediator;

/// Builds policy-checked replacements for filesystem primitives.
///
/// A wrapped primitive checks its path arguments first. When they pass, the
/// original runs with the arguments untouched and its return value is passed
/// back as is. When they fail, the original never runs and the denial is
/// delivered through the caller's convention.
#[derive(Debug, Clone)]
pub struct Interceptor {
    mediator: Mediator,
}

impl Interceptor {
    /// Create an interceptor deciding through `mediator`.
    #[must_use]
    pub fn new(mediator: Mediator) -> Self {
        Self { mediator }
    }

    /// The mediator used for decisions.
    #[must_use]
    pub fn mediator(&self) -> &Mediator {
        &self.mediator
    }

    /// Wrap `original` according to the descriptor of `operation`.
    #[must_use]
    pub fn wrap(&self, operation: FsOperation, original: HostPrimitive) -> HostPrimitive {
        match operation.descriptor().arity {
            Arity::Single => self.wrap_single(operation, original),
            Arity::Dual => self.wrap_dual(operation, original),
        }
    }

    /// Wrap a primitive whose first argument is a path.
    #[must_use]
    pub fn wrap_single(&self, operation: FsOperation, original: HostPrimitive) -> HostPrimitive {
        let mediator = self.mediator.clone();
        Arc::new(move |mut args: HostArgs| {
            let checked = check_single(&mediator, operation, &args);
            dispatch(operation, checked, &original, &mut args)
        })
    }

    /// Wrap a primitive whose first two arguments are paths.
    #[must_use]
    pub fn wrap_dual(&self, operation: FsOperation, original: HostPrimitive) -> HostPrimitive {
        let mediator = self.mediator.clone();
        Arc::new(move |mut args: HostArgs| {
            let checked = check_dual(&mediator, operation, &args);
            dispatch(operation, checked, &original, &mut args)
        })
    }
}

fn check_single(mediator: &Mediator, operation: FsOperation, args: &HostArgs) -> HostResult<()> {
    let path = path_arg(operation, args, 0)?;
    mediator.before(operation, &[path.as_str()])?;
    Ok(())
}

fn check_dual(mediator: &Mediator, operation: FsOperation, args: &HostArgs) -> HostResult<()> {
    let from = path_arg(operation, args, 0)?;
    let to = path_arg(operation, args, 1)?;
    mediator.before(operation, &[from.as_str(), to.as_str()])?;
    Ok(())
}

fn dispatch(
    operation: FsOperation,
    checked: HostResult<()>,
    original: &HostPrimitive,
    args: &mut HostArgs,
) -> HostResult<HostValue> {
    match checked {
        Ok(()) => {
            trace!(%operation, "delegating to original primitive");
            original(std::mem::take(args))
        },
        Err(err) => deliver_error(operation.descriptor(), args, err),
    }
}

fn path_arg(operation: FsOperation, args: &HostArgs, index: usize) -> HostResult<String> {
    match args.get(index) {
        Some(value) => value.as_path().ok_or_else(|| {
            HostError::invalid_argument(
                operation.name(),
                format!("path must be a string or bytes, got {value:?}"),
            )
        }),
        None => Err(HostError::invalid_argument(
            operation.name(),
            "missing path argument",
        )),
    }
}
