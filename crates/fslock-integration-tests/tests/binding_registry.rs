//! Binding lookup through the process registry.

use fslock::prelude::*;
use fslock_test::{RecordingBinding, TestSandbox};

fn registry(sandbox: &TestSandbox, recorder: &RecordingBinding) -> fslock::ProcessBindings {
    let lock = FsLock::with_context(sandbox.context().clone());
    lock.guard_bindings([
        ("fs", recorder.table()),
        ("os", BindingTable::new().with("hostname", |_| Ok("box".into()))),
    ])
}

#[test]
fn test_fs_binding_is_guarded() {
    let sandbox = TestSandbox::new().unwrap();
    let recorder = RecordingBinding::new();
    let bindings = registry(&sandbox, &recorder);

    let fs = bindings.binding("fs").unwrap();
    assert!(fs.is_fs_locked());
    assert!(fs.call("unlink", vec![sandbox.denied("x").into()]).is_err());
    fs.call("unlink", vec![sandbox.allowed("x").into()]).unwrap();
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_nul_suffix_reaches_the_guarded_table() {
    let sandbox = TestSandbox::new().unwrap();
    let recorder = RecordingBinding::new();
    let bindings = registry(&sandbox, &recorder);

    for name in ["fs\0", "\0fs", "f\0s\0\0"] {
        let fs = bindings.binding(name).unwrap();
        assert!(fs.is_fs_locked(), "{name:?}");
        assert!(fs.call("rmdir", vec![sandbox.denied("d").into()]).is_err());
    }
    assert_eq!(recorder.count(), 0);
}

#[test]
fn test_other_bindings_are_untouched() {
    let sandbox = TestSandbox::new().unwrap();
    let recorder = RecordingBinding::new();
    let bindings = registry(&sandbox, &recorder);

    let os = bindings.binding("os").unwrap();
    assert!(!os.is_fs_locked());
    assert_eq!(os.call("hostname", vec![]).unwrap().as_str(), Some("box"));

    let err = bindings.binding("net").unwrap_err();
    assert_eq!(err.to_string(), "No such binding: net");
}

#[test]
fn test_sealed_clones_share_primitives() {
    let sandbox = TestSandbox::new().unwrap();
    let recorder = RecordingBinding::new();
    let bindings = registry(&sandbox, &recorder);

    let first = bindings.binding("fs").unwrap();
    let second = bindings.binding("fs").unwrap();
    first.call("mkdir", vec![sandbox.allowed("a").into()]).unwrap();
    second.call("mkdir", vec![sandbox.allowed("b").into()]).unwrap();
    assert_eq!(recorder.count(), 2);
    assert_eq!(
        first.names().collect::<Vec<_>>(),
        second.names().collect::<Vec<_>>()
    );
}
