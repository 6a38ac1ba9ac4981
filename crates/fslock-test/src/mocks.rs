//! Recording doubles for host primitives and continuations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fslock_intercept::{BindingTable, Continuation, FsOperation, HostArgs, HostResult, HostValue};

/// One invocation seen by a [`RecordingBinding`] primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Operation name.
    pub operation: String,
    /// Path arguments as received.
    pub paths: Vec<String>,
}

/// An `fs` binding whose primitives only record that they ran.
///
/// Every guarded operation is registered. Each primitive records its path
/// arguments and completes with [`HostValue::Undefined`] through whatever
/// convention the caller used, so a test can tell whether the original was
/// reached without touching the disk.
#[derive(Debug, Clone, Default)]
pub struct RecordingBinding {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingBinding {
    /// A recorder with no calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table implementing every guarded operation plus an unguarded
    /// `stat`.
    #[must_use]
    pub fn table(&self) -> BindingTable {
        let mut table = BindingTable::new();
        for operation in FsOperation::ALL {
            let calls = Arc::clone(&self.calls);
            table.insert(
                operation.name(),
                Arc::new(move |mut args: HostArgs| {
                    let continuation = Continuation::take(&mut args, operation.descriptor());
                    let count = operation.descriptor().arity.path_count();
                    record(&calls, operation.name(), &args, count);
                    continuation.complete(Ok(HostValue::Undefined))
                }),
            );
        }
        let calls = Arc::clone(&self.calls);
        table.with("stat", move |args| {
            record(&calls, "stat", &args, 1);
            Ok(HostValue::Bool(true))
        })
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// True if `operation` ran at least once.
    #[must_use]
    pub fn was_called(&self, operation: &str) -> bool {
        lock(&self.calls).iter().any(|c| c.operation == operation)
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

fn record(calls: &Mutex<Vec<RecordedCall>>, operation: &str, args: &HostArgs, count: usize) {
    let paths = args
        .iter()
        .take(count)
        .filter_map(HostValue::as_path)
        .collect();
    lock(calls).push(RecordedCall {
        operation: operation.to_owned(),
        paths,
    });
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Captures what a callback or completion handler received.
#[derive(Debug, Clone, Default)]
pub struct CallbackProbe {
    state: Arc<Mutex<ProbeState>>,
}

#[derive(Debug, Default)]
struct ProbeState {
    invocations: usize,
    outcome: Option<HostResult<HostValue>>,
}

impl CallbackProbe {
    /// A probe that has not been invoked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A trailing callback that reports into this probe.
    #[must_use]
    pub fn callback(&self) -> HostValue {
        let state = Arc::clone(&self.state);
        HostValue::callback(move |outcome| store(&state, outcome))
    }

    /// A completion request whose handler reports into this probe.
    #[must_use]
    pub fn request(&self) -> HostValue {
        let state = Arc::clone(&self.state);
        HostValue::request(move |outcome| store(&state, outcome))
    }

    /// How many times the continuation ran.
    #[must_use]
    pub fn invocations(&self) -> usize {
        lock(&self.state).invocations
    }

    /// Take the last outcome received, if any.
    #[must_use]
    pub fn take(&self) -> Option<HostResult<HostValue>> {
        lock(&self.state).outcome.take()
    }

    /// The error message received, if the continuation got an error.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match &lock(&self.state).outcome {
            Some(Err(err)) => Some(err.to_string()),
            _ => None,
        }
    }

    /// True if the continuation ran with a success value.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(lock(&self.state).outcome, Some(Ok(_)))
    }
}

fn store(state: &Mutex<ProbeState>, outcome: HostResult<HostValue>) {
    let mut state = lock(state);
    state.invocations = state.invocations.saturating_add(1);
    state.outcome = Some(outcome);
}
