//! Test harness utilities.

use tracing_subscriber::EnvFilter;

/// Set up tracing output for tests.
///
/// Output goes through the test writer so it is captured per test. Safe to
/// call from every test; only the first call installs a subscriber.
///
/// # Example
///
/// ```rust,ignore
/// #[test]
/// fn my_test() {
///     setup_test_logging("fslock_intercept=debug");
///     // ... test code
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging with default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}
