//! Access to the source files being rewritten.
//!
//! The runner never touches the filesystem directly; it goes through a
//! [`SourceStore`]. [`DiskStore`] is the real tree, [`MemoryStore`] maps
//! virtual paths to contents so whole runs can be exercised without side
//! effects.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::discovery::{discover_files, without_cur_dir, DiscoveryFilter};
use crate::core::errors::{MendError, Result, ResultExt};

/// Enumerate, read and overwrite source files.
pub trait SourceStore {
    /// List files below `root` accepted by `filter`, in lexical order.
    fn discover(&self, root: &Path, filter: &DiscoveryFilter) -> Result<Vec<PathBuf>>;

    /// Read the full UTF-8 contents of `path`.
    fn read(&self, path: &Path) -> Result<String>;

    /// Replace the contents of `path`.
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// The local filesystem. Writes overwrite in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl SourceStore for DiskStore {
    fn discover(&self, root: &Path, filter: &DiscoveryFilter) -> Result<Vec<PathBuf>> {
        discover_files(root, filter)
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_path("Failed to read", path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).with_path("Failed to write", path)
    }
}

/// In-memory tree of virtual paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
    read_only: BTreeSet<PathBuf>,
    writes: usize,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder form of [`MemoryStore::insert`].
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Make writes to `path` fail with `PermissionDenied`.
    pub fn mark_read_only(&mut self, path: impl Into<PathBuf>) {
        self.read_only.insert(path.into());
    }

    /// Current contents of `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SourceStore for MemoryStore {
    fn discover(&self, root: &Path, filter: &DiscoveryFilter) -> Result<Vec<PathBuf>> {
        let prefix = without_cur_dir(root);
        let mut under_root = self
            .files
            .keys()
            .filter(|path| without_cur_dir(path).starts_with(&prefix))
            .peekable();
        if under_root.peek().is_none() {
            return Err(MendError::discovery(root, "No such directory"));
        }

        Ok(under_root
            .filter(|path| filter.matches(path, root))
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such file"))
            .with_path("Failed to read", path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        if self.read_only.contains(path) {
            return Err::<(), _>(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"))
                .with_path("Failed to write", path);
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        self.writes += 1;
        Ok(())
    }
}
