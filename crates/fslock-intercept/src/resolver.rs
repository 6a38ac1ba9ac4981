//! A small reference module resolver over search paths.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::HostResult;
use crate::module::ModuleResolver;

/// Extensions tried when a request does not name an existing file.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

/// Resolves module requests to files.
///
/// - `./x` and `../x` resolve against the first search path
/// - `/x` is taken as is
/// - bare `x` is tried under each search path in order
///
/// Each candidate is tried as written, then with each extension appended.
#[derive(Debug, Clone)]
pub struct SearchPathResolver {
    extensions: Vec<String>,
}

impl Default for SearchPathResolver {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl SearchPathResolver {
    /// A resolver using [`DEFAULT_EXTENSIONS`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver trying `extensions` in order.
    #[must_use]
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    fn candidates(request: &str, search_paths: &[String]) -> Vec<PathBuf> {
        if is_relative_request(request) {
            search_paths
                .first()
                .map(|base| Path::new(base).join(request))
                .into_iter()
                .collect()
        } else if Path::new(request).is_absolute() {
            vec![PathBuf::from(request)]
        } else {
            search_paths
                .iter()
                .map(|base| Path::new(base).join(request))
                .collect()
        }
    }

    fn try_file(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }
        self.extensions.iter().find_map(|ext| {
            let mut with_ext = candidate.as_os_str().to_owned();
            with_ext.push(ext);
            let path = PathBuf::from(with_ext);
            path.is_file().then_some(path)
        })
    }
}

impl ModuleResolver for SearchPathResolver {
    fn resolve(&self, request: &str, search_paths: &[String]) -> HostResult<Option<String>> {
        let found = Self::candidates(request, search_paths)
            .iter()
            .find_map(|candidate| self.try_file(candidate));
        trace!(request, found = ?found, "module lookup");
        Ok(found.map(|path| path.to_string_lossy().into_owned()))
    }
}

fn is_relative_request(request: &str) -> bool {
    request == "."
        || request == ".."
        || request.starts_with("./")
        || request.starts_with("../")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> (tempfile::TempDir, String, String) {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("lib");
        let vendor = dir.path().join("vendor");
        fs::create_dir_all(&lib).unwrap();
        fs::create_dir_all(&vendor).unwrap();
        fs::write(lib.join("util.js"), "").unwrap();
        fs::write(vendor.join("left-pad.js"), "").unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let lib = lib.to_string_lossy().into_owned();
        let vendor = vendor.to_string_lossy().into_owned();
        (dir, lib, vendor)
    }

    #[test]
    fn test_relative_request_uses_first_search_path() {
        let (dir, lib, vendor) = tree();
        let resolver = SearchPathResolver::new();

        let found = resolver
            .resolve("./util", &[lib.clone(), vendor.clone()])
            .unwrap()
            .unwrap();
        assert!(found.ends_with("util.js"));

        let up = resolver.resolve("../package.json", &[lib]).unwrap().unwrap();
        assert_eq!(
            Path::new(&up).file_name(),
            dir.path().join("package.json").file_name()
        );
    }

    #[test]
    fn test_bare_request_searches_in_order() {
        let (_dir, lib, vendor) = tree();
        let found = SearchPathResolver::new()
            .resolve("left-pad", &[lib, vendor])
            .unwrap()
            .unwrap();
        assert!(found.contains("vendor"));
    }

    #[test]
    fn test_absolute_request() {
        let (dir, _, _) = tree();
        let path = dir.path().join("package.json");
        let found = SearchPathResolver::new()
            .resolve(&path.to_string_lossy(), &[])
            .unwrap();
        assert_eq!(found, Some(path.to_string_lossy().into_owned()));
    }

    #[test]
    fn test_missing_module() {
        let (_dir, lib, _) = tree();
        let resolver = SearchPathResolver::with_extensions([".rs"]);
        assert_eq!(resolver.resolve("util", &[lib]).unwrap(), None);
        assert_eq!(resolver.resolve("./util", &[]).unwrap(), None);
    }
}
