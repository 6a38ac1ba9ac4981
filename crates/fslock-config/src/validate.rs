//! Checks applied to resolved allowlist entries.

use fslock_core::ListName;
use fslock_core::path::SEPARATOR;

use crate::error::{ConfigError, ConfigResult};

/// Check that every entry of `list` is absolute, separator-terminated and
/// free of NUL bytes.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] naming the first bad entry.
pub fn validate_entries(list: ListName, entries: &[String]) -> ConfigResult<()> {
    for entry in entries {
        let problem = if entry.contains('\0') {
            Some("contains a NUL byte")
        } else if !entry.starts_with(SEPARATOR) {
            Some("is not absolute")
        } else if !entry.ends_with(SEPARATOR) {
            Some("does not end with a separator")
        } else {
            None
        };

        if let Some(problem) = problem {
            return Err(ConfigError::ValidationError {
                field: list.to_string(),
                message: format!("entry {entry:?} {problem}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_normalized_entries_pass() {
        assert!(validate_entries(ListName::FileAccessDir, &entries(&["/", "/srv/app/"])).is_ok());
        assert!(validate_entries(ListName::OpenBasedir, &[]).is_ok());
    }

    #[test]
    fn test_nul_byte_is_rejected() {
        let err = validate_entries(ListName::OpenBasedir, &entries(&["/srv/\0/"])).unwrap_err();
        assert!(err.to_string().contains("open_basedir"));
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn test_unnormalized_entries_are_rejected() {
        assert!(validate_entries(ListName::FileAccessDir, &entries(&["srv/"])).is_err());
        assert!(validate_entries(ListName::FileAccessDir, &entries(&["/srv"])).is_err());
    }
}
