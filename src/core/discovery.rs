//! Source file discovery.
//!
//! Walks a root directory in lexical order and keeps every regular file whose
//! extension is in the configured set and whose root-relative path is not
//! matched by an exclude glob. A root that cannot be read, or a walk error
//! below it, aborts discovery: nothing is processed from a partial listing.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::config::DiscoveryConfig;
use crate::core::errors::{MendError, Result};

/// Compiled form of the discovery settings.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    extensions: HashSet<String>,
    exclude: Option<GlobSet>,
}

impl DiscoveryFilter {
    /// Compile the extension set and exclude globs from configuration.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        Ok(Self {
            extensions: config.normalized_extensions().into_iter().collect(),
            exclude: compile_globset(&config.exclude_patterns)?,
        })
    }

    /// Whether `path`, found below `root`, should be rewritten.
    pub fn matches(&self, path: &Path, root: &Path) -> bool {
        let extension = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return false,
        };

        if !self.extensions.contains(&extension) {
            return false;
        }

        if let Some(exclude) = &self.exclude {
            let path = without_cur_dir(path);
            let relative = path.strip_prefix(without_cur_dir(root)).unwrap_or(path.as_path());
            if exclude.is_match(relative) {
                return false;
            }
        }

        true
    }
}

/// Discover every matching file below `root` on disk, in lexical order.
pub fn discover_files(root: &Path, filter: &DiscoveryFilter) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root).map_err(|err| MendError::discovery(root, err.to_string()))?;
    if !metadata.is_dir() {
        return Err(MendError::discovery(root, "Not a directory"));
    }

    let mut collected = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|err| MendError::discovery(root, err.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if filter.matches(path, root) {
            collected.push(path.to_path_buf());
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    info!(
        "File discovery completed: {} files selected under {}",
        collected.len(),
        root.display()
    );
    Ok(collected)
}

/// `path` with every `.` component dropped; `.` itself becomes the empty path.
pub fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Compile glob patterns into a set; `None` when no pattern is given.
pub fn compile_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    let mut builder = GlobSetBuilder::new();
    let mut added = false;

    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }

        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()
            .map_err(|err| MendError::config(format!("Invalid glob pattern '{pattern}': {err}")))?;
        builder.add(glob);
        added = true;
    }

    if added {
        builder
            .build()
            .map(Some)
            .map_err(|err| MendError::config(format!("Failed to build glob set: {err}")))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn filter_for(extensions: &[&str], excludes: &[&str]) -> DiscoveryFilter {
        let config = DiscoveryConfig {
            extensions: extensions.iter().map(|s| (*s).to_string()).collect(),
            exclude_patterns: excludes.iter().map(|s| (*s).to_string()).collect(),
            ..DiscoveryConfig::default()
        };
        DiscoveryFilter::from_config(&config).unwrap()
    }

    #[test]
    fn compile_globset_rejects_invalid_patterns() {
        let result = compile_globset(&["[invalid".to_string()]);
        assert!(result.is_err());

        let valid = compile_globset(&["**/*.rs".to_string()]).unwrap();
        assert!(valid.unwrap().is_match("src/lib.rs"));

        assert!(compile_globset(&["  ".to_string()]).unwrap().is_none());
    }

    #[test]
    fn filter_respects_extension_and_excludes() {
        let filter = filter_for(&["rs"], &["generated/**"]);
        let root = Path::new("workspace");

        assert!(filter.matches(&root.join("src/lib.rs"), root));
        assert!(filter.matches(&root.join("src/UPPER.RS"), root));
        assert!(!filter.matches(&root.join("src/lib.ts"), root));
        assert!(!filter.matches(&root.join("Makefile"), root));
        assert!(!filter.matches(&root.join("generated/out.rs"), root));
    }

    #[test]
    fn excludes_apply_below_a_dot_root() {
        let filter = filter_for(&["rs"], &["generated/**"]);

        assert!(!filter.matches(Path::new("./generated/out.rs"), Path::new(".")));
        assert!(!filter.matches(Path::new("generated/out.rs"), Path::new(".")));
        assert!(!filter.matches(Path::new("src/generated/out.rs"), Path::new("./src")));
        assert!(filter.matches(Path::new("src/lib.rs"), Path::new(".")));
    }

    #[test]
    fn without_cur_dir_drops_dot_components() {
        assert_eq!(without_cur_dir(Path::new(".")), PathBuf::new());
        assert_eq!(without_cur_dir(Path::new("./src/a.rs")), PathBuf::from("src/a.rs"));
        assert_eq!(without_cur_dir(Path::new("src/./a.rs")), PathBuf::from("src/a.rs"));
        assert_eq!(without_cur_dir(Path::new("/abs/./x")), PathBuf::from("/abs/x"));
    }

    #[test]
    fn discovers_nested_files_in_lexical_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/inner/z.rs"), "").unwrap();
        fs::write(root.join("b/m.rs"), "").unwrap();
        fs::write(root.join("a/y.rs"), "").unwrap();
        fs::write(root.join("a/notes.md"), "").unwrap();
        fs::write(root.join("top.rs"), "").unwrap();

        let files = discover_files(root, &filter_for(&["rs"], &[])).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a/y.rs"),
                PathBuf::from("b/inner/z.rs"),
                PathBuf::from("b/m.rs"),
                PathBuf::from("top.rs"),
            ]
        );
    }

    #[test]
    fn missing_root_is_a_discovery_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = discover_files(&missing, &filter_for(&["rs"], &[])).unwrap_err();
        assert!(matches!(err, MendError::Discovery { .. }));
    }

    #[test]
    fn file_root_is_a_discovery_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("lib.rs");
        fs::write(&file, "    \"orphan\";\n").unwrap();

        let err = discover_files(&file, &filter_for(&["rs"], &[])).unwrap_err();
        assert!(matches!(err, MendError::Discovery { .. }));
        assert!(err.to_string().contains("Not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_aborts_discovery() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        let locked = root.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(root.join("a.rs"), "").unwrap();
        fs::write(locked.join("b.rs"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory; nothing to observe then.
        let listable = fs::read_dir(&locked).is_ok();
        let result = discover_files(root, &filter_for(&["rs"], &[]));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if listable {
            return;
        }
        let err = result.unwrap_err();
        assert!(matches!(err, MendError::Discovery { .. }));
    }
}
