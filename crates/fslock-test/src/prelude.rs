//! Prelude module - commonly used types for convenient import.
//!
//! Use `use fslock_test::prelude::*;` to import all essential types.

pub use crate::{
    CallbackProbe, RecordedCall, RecordingBinding, TestSandbox, setup_test_logging,
    setup_test_logging_default,
};
