//! Environment variables read at process start.
//!
//! The list variables also answer to their legacy names,
//! `NODEJS_FILE_ACCESSDIR` and `NODEJS_OPEN_BASEDIR`. A legacy variable is
//! only consulted when the `FSLOCK_*` one is unset or blank.

use std::collections::HashMap;
use std::env;

use fslock_core::ListName;

use crate::error::{ConfigError, ConfigResult};

/// Prefix shared by every variable this crate reads.
pub const ENV_PREFIX: &str = "FSLOCK_";

/// Directories for `file_accessdir`: one path or a colon-separated list.
pub const ENV_FILE_ACCESSDIR: &str = "FSLOCK_FILE_ACCESSDIR";

/// Directories for `open_basedir`: one path or a colon-separated list.
pub const ENV_OPEN_BASEDIR: &str = "FSLOCK_OPEN_BASEDIR";

/// Legacy name of [`ENV_FILE_ACCESSDIR`].
pub const LEGACY_ENV_FILE_ACCESSDIR: &str = "NODEJS_FILE_ACCESSDIR";

/// Legacy name of [`ENV_OPEN_BASEDIR`].
pub const LEGACY_ENV_OPEN_BASEDIR: &str = "NODEJS_OPEN_BASEDIR";

/// Path of an optional TOML configuration file.
pub const ENV_CONFIG: &str = "FSLOCK_CONFIG";

/// A snapshot of the relevant environment.
pub type EnvVars = HashMap<String, String>;

/// The variable that feeds `list`.
#[must_use]
pub const fn env_var_for(list: ListName) -> &'static str {
    match list {
        ListName::FileAccessDir => ENV_FILE_ACCESSDIR,
        ListName::OpenBasedir => ENV_OPEN_BASEDIR,
    }
}

/// The legacy variable that feeds `list`.
#[must_use]
pub const fn legacy_env_var_for(list: ListName) -> &'static str {
    match list {
        ListName::FileAccessDir => LEGACY_ENV_FILE_ACCESSDIR,
        ListName::OpenBasedir => LEGACY_ENV_OPEN_BASEDIR,
    }
}

fn is_relevant(key: &str) -> bool {
    key.starts_with(ENV_PREFIX)
        || key == LEGACY_ENV_FILE_ACCESSDIR
        || key == LEGACY_ENV_OPEN_BASEDIR
}

/// Collect every `FSLOCK_*` variable, plus the legacy list variables, from
/// the process environment.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] if one of them is not valid Unicode.
pub fn collect_env_vars() -> ConfigResult<EnvVars> {
    let mut vars = EnvVars::new();
    for (key, value) in env::vars_os() {
        let Some(key) = key.to_str() else {
            continue;
        };
        if !is_relevant(key) {
            continue;
        }
        let value = value.into_string().map_err(|_| ConfigError::EnvError {
            var_name: key.to_owned(),
            message: "value is not valid Unicode".to_owned(),
        })?;
        vars.insert(key.to_owned(), value);
    }
    Ok(vars)
}

/// The raw value feeding `list`, if set to something other than blanks.
///
/// The `FSLOCK_*` variable wins over the legacy one.
#[must_use]
pub fn list_value(vars: &EnvVars, list: ListName) -> Option<&str> {
    [env_var_for(list), legacy_env_var_for(list)]
        .into_iter()
        .filter_map(|name| vars.get(name))
        .map(String::as_str)
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_names() {
        assert_eq!(env_var_for(ListName::FileAccessDir), "FSLOCK_FILE_ACCESSDIR");
        assert_eq!(env_var_for(ListName::OpenBasedir), "FSLOCK_OPEN_BASEDIR");
        assert!(ENV_CONFIG.starts_with(ENV_PREFIX));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let mut vars = EnvVars::new();
        vars.insert(ENV_FILE_ACCESSDIR.to_owned(), "  ".to_owned());
        vars.insert(ENV_OPEN_BASEDIR.to_owned(), "/a:/b".to_owned());
        assert_eq!(list_value(&vars, ListName::FileAccessDir), None);
        assert_eq!(list_value(&vars, ListName::OpenBasedir), Some("/a:/b"));
    }

    #[test]
    fn test_collect_only_keeps_relevant_vars() {
        let vars = collect_env_vars().unwrap();
        assert!(vars.keys().all(|k| is_relevant(k)));
        assert!(!is_relevant("NODEJS_OTHER"));
        assert!(is_relevant(LEGACY_ENV_OPEN_BASEDIR));
    }

    #[test]
    fn test_legacy_names_are_accepted() {
        let mut vars = EnvVars::new();
        vars.insert(LEGACY_ENV_FILE_ACCESSDIR.to_owned(), "/legacy".to_owned());
        vars.insert(LEGACY_ENV_OPEN_BASEDIR.to_owned(), "/old".to_owned());
        vars.insert(ENV_OPEN_BASEDIR.to_owned(), "/new".to_owned());

        assert_eq!(list_value(&vars, ListName::FileAccessDir), Some("/legacy"));
        assert_eq!(list_value(&vars, ListName::OpenBasedir), Some("/new"));

        vars.insert(ENV_OPEN_BASEDIR.to_owned(), " ".to_owned());
        assert_eq!(list_value(&vars, ListName::OpenBasedir), Some("/old"));
    }
}
