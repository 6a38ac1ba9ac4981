//! Allowlist decisions and denial messages as seen through guarded bindings.

use std::sync::Arc;

use fslock_core::{
    ConfigUpdate, ListName, PathNormalizer, SandboxContext, SandboxError, resolve_list,
};
use fslock_intercept::{HostValue, Interceptor, Mediator};
use fslock_test::{RecordingBinding, setup_test_logging_default};

fn home_x() -> Arc<SandboxContext> {
    let context = SandboxContext::new(PathNormalizer::new("/home/x"));
    context
        .configure(&ConfigUpdate::new().file_accessdir(["/home/x/"]), false)
        .unwrap();
    Arc::new(context)
}

#[test]
fn test_single_path_outside_allowlist() {
    setup_test_logging_default();
    let recorder = RecordingBinding::new();
    let fs = recorder
        .table()
        .augment(&Interceptor::new(Mediator::new(home_x())));

    let err = fs.call("readdir", vec!["/tmp".into()]).unwrap_err();
    assert_eq!(err.to_string(), "Access denied (file: /tmp)");
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_rename_both_paths_denied() {
    let recorder = RecordingBinding::new();
    let fs = recorder
        .table()
        .augment(&Interceptor::new(Mediator::new(home_x())));

    let err = fs
        .call("rename", vec!["/tmp".into(), "/tmp2".into()])
        .unwrap_err();
    assert_eq!(err.to_string(), "Access denied (file: /tmp, /tmp2)");
    assert_eq!(
        err.as_sandbox(),
        Some(&SandboxError::FileAccessDenied {
            paths: vec!["/tmp".into(), "/tmp2".into()],
        })
    );
}

#[test]
fn test_rename_lists_only_the_denied_member() {
    let recorder = RecordingBinding::new();
    let fs = recorder
        .table()
        .augment(&Interceptor::new(Mediator::new(home_x())));

    let err = fs
        .call("rename", vec!["/home/x/sub".into(), "/tmp".into()])
        .unwrap_err();
    assert_eq!(err.to_string(), "Access denied (file: /tmp)");

    let err = fs
        .call("link", vec!["/tmp".into(), "/home/x/sub".into()])
        .unwrap_err();
    assert_eq!(err.to_string(), "Access denied (file: /tmp)");
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_allowed_paths_reach_the_primitive_unchanged() {
    let recorder = RecordingBinding::new();
    let fs = recorder
        .table()
        .augment(&Interceptor::new(Mediator::new(home_x())));

    fs.call("symlink", vec!["/home/x/a".into(), "sub/b".into()])
        .unwrap();
    fs.call("unlink", vec!["/home/x".into()]).unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].paths, ["/home/x/a", "sub/b"]);
    assert_eq!(calls[1].paths, ["/home/x"]);
}

#[test]
fn test_component_boundary_and_traversal() {
    let context = home_x();
    assert!(context.is_access_allowed("/home/x"));
    assert!(context.is_access_allowed("/home/x/deep/file"));
    assert!(!context.is_access_allowed("/home/xy"));
    assert!(!context.is_access_allowed("/home/x/../y"));
    assert!(context.is_access_allowed("docs/../notes"));
    assert!(!context.is_access_allowed("../y"));
}

#[test]
fn test_url_paths_are_never_allowed() {
    let context = SandboxContext::new(PathNormalizer::new("/"));
    for url in ["http://example.com/x", "https://example.com/", "http:", "https:x"] {
        assert!(!context.is_allowed(url, ListName::FileAccessDir), "{url}");
        assert!(!context.is_allowed(url, ListName::OpenBasedir), "{url}");
    }

    let fs = RecordingBinding::new()
        .table()
        .augment(&Interceptor::new(Mediator::new(Arc::new(context))));
    let err = fs
        .call("open", vec!["https://example.com/x".into()])
        .unwrap_err();
    assert_eq!(err.to_string(), "Access denied (file: https://example.com/x)");
}

#[test]
fn test_resolve_list_appends_filtered_entries() {
    let normalizer = PathNormalizer::new("/");
    let existing = vec!["/tmp".to_owned(), "/log".to_owned()];
    let resolved = resolve_list(
        &normalizer,
        &existing,
        [Some("/foo"), Some("/bar"), None, Some("")],
    );
    assert_eq!(resolved, ["/tmp", "/log", "/foo/", "/bar/"]);

    let again = resolve_list(&normalizer, &[], resolved.iter().map(|e| Some(e.as_str())));
    assert_eq!(again, ["/tmp/", "/log/", "/foo/", "/bar/"]);
    let twice = resolve_list(&normalizer, &[], again.iter().map(|e| Some(e.as_str())));
    assert_eq!(twice, again);
}

#[test]
fn test_unguarded_operations_pass_through() {
    let recorder = RecordingBinding::new();
    let fs = recorder
        .table()
        .augment(&Interceptor::new(Mediator::new(home_x())));

    let ret = fs.call("stat", vec!["/etc/passwd".into()]).unwrap();
    assert!(matches!(ret, HostValue::Bool(true)));
    assert!(recorder.was_called("stat"));
}
