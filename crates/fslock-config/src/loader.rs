//! Layered loading of the initial configuration.
//!
//! Sources, in order:
//! 1. Embedded default: every list unset, so it reads as `/`
//! 2. TOML file (explicit path, or `FSLOCK_CONFIG`)
//! 3. `FSLOCK_FILE_ACCESSDIR` / `FSLOCK_OPEN_BASEDIR`
//!
//! Sources add to a list rather than replace it. A list no source mentions
//! stays unset.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use fslock_core::{Config, ListName, PathNormalizer, resolve_list, split_list};
use serde::Deserialize;
use tracing::{debug, info};

use crate::env::{self, ENV_CONFIG, EnvVars};
use crate::error::{ConfigError, ConfigResult};
use crate::validate::validate_entries;

/// Maximum config file size (1 MiB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    sandbox: SandboxSection,
}

/// The `[sandbox]` table of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SandboxSection {
    /// Raw `file_accessdir` entries.
    #[serde(default)]
    pub file_accessdir: Option<Vec<String>>,
    /// Raw `open_basedir` entries.
    #[serde(default)]
    pub open_basedir: Option<Vec<String>>,
}

impl SandboxSection {
    /// The raw entries of one list, if the file mentions it.
    #[must_use]
    pub fn list(&self, name: ListName) -> Option<&[String]> {
        match name {
            ListName::FileAccessDir => self.file_accessdir.as_deref(),
            ListName::OpenBasedir => self.open_basedir.as_deref(),
        }
    }
}

/// Parse configuration file contents. `origin` names the source in errors.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] for malformed TOML or unknown keys.
pub fn parse_str(content: &str, origin: &str) -> ConfigResult<SandboxSection> {
    let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })?;
    Ok(file.sandbox)
}

/// Read and parse a configuration file.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, is larger than
/// [`MAX_CONFIG_FILE_SIZE`], or does not parse.
pub fn load_file(path: &Path) -> ConfigResult<SandboxSection> {
    let read_error = |source: io::Error| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    };

    // At most one byte past the cap is ever read.
    let mut content = String::new();
    File::open(path)
        .map_err(read_error)?
        .take(MAX_CONFIG_FILE_SIZE.saturating_add(1))
        .read_to_string(&mut content)
        .map_err(read_error)?;

    let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
    if size > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!("config file exceeds the {MAX_CONFIG_FILE_SIZE} byte limit"),
        });
    }

    let section = parse_str(&content, &path.display().to_string())?;
    debug!(path = %path.display(), "loaded sandbox config file");
    Ok(section)
}

/// Build the initial configuration from `file` (or the file named by
/// `FSLOCK_CONFIG` in `vars`) and the list variables in `vars`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be loaded or a resolved
/// entry fails validation.
pub fn load(
    normalizer: &PathNormalizer,
    file: Option<&Path>,
    vars: &EnvVars,
) -> ConfigResult<Config> {
    let file_path = file
        .map(Path::to_path_buf)
        .or_else(|| vars.get(ENV_CONFIG).filter(|p| !p.is_empty()).map(PathBuf::from));
    let section = file_path.as_deref().map(load_file).transpose()?;

    let mut config = Config::default();
    for list in ListName::ALL {
        let mut entries: Option<Vec<String>> = None;

        if let Some(raw) = section.as_ref().and_then(|s| s.list(list)) {
            let base = entries.take().unwrap_or_default();
            entries = Some(resolve_list(normalizer, &base, raw.iter().map(Some)));
        }

        if let Some(joined) = env::list_value(vars, list) {
            let base = entries.take().unwrap_or_default();
            entries = Some(resolve_list(normalizer, &base, split_list(joined).map(Some)));
        }

        if let Some(entries) = entries {
            validate_entries(list, &entries)?;
            config.set(list, entries);
        }
    }

    info!(
        file = ?file_path,
        file_accessdir = ?config.configured(ListName::FileAccessDir),
        open_basedir = ?config.configured(ListName::OpenBasedir),
        "initial sandbox configuration loaded"
    );
    Ok(config)
}

/// [`load`] against the process environment.
///
/// # Errors
///
/// See [`load`] and [`env::collect_env_vars`].
pub fn load_from_env(normalizer: &PathNormalizer) -> ConfigResult<Config> {
    let vars = env::collect_env_vars()?;
    load(normalizer, None, &vars)
}
