//! Initial configuration from files and environment snapshots.

use std::fs;

use fslock::config::{ENV_CONFIG, ENV_FILE_ACCESSDIR, ENV_OPEN_BASEDIR, EnvVars};
use fslock::prelude::*;
use fslock_config::ConfigError;

fn vars(pairs: &[(&str, &str)]) -> EnvVars {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn test_env_lists_are_split_and_resolved() {
    let lock = FsLock::install(
        InstallOptions::new()
            .with_base_dir("/srv/app")
            .with_env(vars(&[
                (ENV_FILE_ACCESSDIR, "/srv/app:/var/cache/app"),
                (ENV_OPEN_BASEDIR, "node_modules"),
            ])),
    )
    .unwrap();

    assert!(lock.context().is_access_allowed("/var/cache/app/x"));
    assert!(!lock.context().is_access_allowed("/var/cache/other"));
    assert_eq!(lock.get_allowed_require(), ["/srv/app/node_modules/"]);
}

#[test]
fn test_config_file_named_by_env() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("fslock.toml");
    fs::write(
        &file,
        "[sandbox]\nfile_accessdir = [\"/data\"]\nopen_basedir = [\"/data/lib\"]\n",
    )
    .unwrap();
    let path = file.to_string_lossy().into_owned();

    let lock = FsLock::install(
        InstallOptions::new()
            .with_base_dir("/")
            .with_env(vars(&[(ENV_CONFIG, path.as_str()), (ENV_OPEN_BASEDIR, "/opt/lib")])),
    )
    .unwrap();

    assert_eq!(lock.get_allowed_require(), ["/data/lib/", "/opt/lib/"]);
    assert!(lock.is_require_allowed("/data/lib/m.js"));
    assert!(!lock.is_require_allowed("/opt/lib/m.js"));
}

#[test]
fn test_blank_env_keeps_default() {
    let lock = FsLock::install(
        InstallOptions::new()
            .with_base_dir("/")
            .with_env(vars(&[(ENV_FILE_ACCESSDIR, "   ")])),
    )
    .unwrap();
    assert!(lock.context().is_access_allowed("/anything"));
}

#[test]
fn test_programmatic_configure_extends_loaded_config() {
    let lock = FsLock::install(
        InstallOptions::new()
            .with_base_dir("/srv")
            .with_env(vars(&[(ENV_FILE_ACCESSDIR, "/srv")])),
    )
    .unwrap();
    lock.configure(&ConfigUpdate::new().file_accessdir(["/tmp/app"]), false)
        .unwrap();

    assert!(lock.context().is_access_allowed("/srv/x"));
    assert!(lock.context().is_access_allowed("/tmp/app/x"));
    assert!(!lock.context().is_access_allowed("/tmp/other"));
}

#[test]
fn test_unknown_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("fslock.toml");
    fs::write(&file, "[sandbox]\nallow_everything = true\n").unwrap();

    let err = FsLock::install(
        InstallOptions::new()
            .with_base_dir("/")
            .with_config_file(&file)
            .with_env(EnvVars::new()),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FsLockError::Config(ConfigError::ParseError { .. })
    ));
}
