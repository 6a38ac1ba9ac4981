//! Module resolution and native library loads under `open_basedir` and
//! `file_accessdir`.

use std::fs;

use fslock_intercept::{HostError, HostResult, ModuleResolver, NativeTarget, SearchPathResolver};
use fslock_test::TestSandbox;

fn write(path: &str) {
    fs::write(path, "").unwrap();
}

#[test]
fn test_relative_request_escaping_basedir_names_the_request() {
    let sandbox = TestSandbox::new().unwrap();
    write(&sandbox.allowed("package.json"));
    let guard = sandbox.module_guard();

    let err = guard
        .find_path(
            &SearchPathResolver::new(),
            "../package.json",
            &[sandbox.module("")],
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Access denied (module: ../package.json)");
}

#[test]
fn test_resolution_inside_basedir() {
    let sandbox = TestSandbox::new().unwrap();
    write(&sandbox.module("util.js"));
    let guard = sandbox.module_guard();

    let found = guard
        .find_path(&SearchPathResolver::new(), "util", &[sandbox.module("")])
        .unwrap();
    assert_eq!(found, Some(sandbox.module("util.js")));

    let dotted = guard
        .find_path(&SearchPathResolver::new(), "./util", &[sandbox.module("")])
        .unwrap()
        .unwrap();
    assert!(sandbox.context().is_require_allowed(&dotted));

    let missing = guard
        .find_path(&SearchPathResolver::new(), "./nope", &[sandbox.module("")])
        .unwrap();
    assert_eq!(missing, None);
}

#[test]
fn test_guarded_resolver_wraps_any_closure() {
    let sandbox = TestSandbox::new().unwrap();
    let outside = sandbox.denied("evil.js");
    let resolver = sandbox
        .module_guard()
        .guard_resolver(move |_: &str, _: &[String]| -> HostResult<Option<String>> {
            Ok(Some(outside.clone()))
        });

    let err = resolver.resolve("evil", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Access denied (module: evil)");
}

#[test]
fn test_resolver_errors_pass_through() {
    let sandbox = TestSandbox::new().unwrap();
    let failing = |request: &str, _: &[String]| -> HostResult<Option<String>> {
        Err(HostError::invalid_argument("require", format!("bad request {request}")))
    };
    let err = sandbox
        .module_guard()
        .find_path(&failing, "x", &[])
        .unwrap_err();
    assert!(matches!(err, HostError::InvalidArgument { .. }));
}

#[test]
fn test_native_loads_check_file_accessdir() {
    let sandbox = TestSandbox::new().unwrap();
    let guard = sandbox.module_guard();

    let inside = NativeTarget::Module {
        filename: sandbox.allowed("addon.node"),
    };
    let loaded = guard
        .dlopen(&inside, |target| Ok(target.path().to_owned()))
        .unwrap();
    assert_eq!(loaded, sandbox.allowed("addon.node"));

    let outside = NativeTarget::from(sandbox.denied("addon.node"));
    let mut reached = false;
    let err = guard
        .dlopen(&outside, |_| {
            reached = true;
            Ok(())
        })
        .unwrap_err();
    assert!(!reached);
    assert_eq!(
        err.to_string(),
        format!("Access denied (native module: {})", sandbox.denied("addon.node"))
    );
}

#[test]
fn test_require_needs_both_lists() {
    let sandbox = TestSandbox::new().unwrap();
    let guard = sandbox.module_guard();

    assert!(guard.is_require_allowed(&sandbox.module("m.js")));
    assert!(!guard.is_require_allowed(&sandbox.allowed("m.js")));
    assert!(!guard.is_require_allowed(&sandbox.denied("m.js")));
    assert_eq!(guard.allowed_require(), [sandbox.module("")]);
}
