//! Last-known content per file

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps each saved path to its content at the previous save
///
/// Entries are never removed; a deleted file's stale snapshot is harmless.
#[derive(Debug, Default)]
pub struct SnapshotTracker {
    snapshots: HashMap<PathBuf, String>,
}

impl SnapshotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `content` as the latest state of `path`.
    ///
    /// Returns `None` the first time a path is seen, in which case there is
    /// nothing to diff against. Otherwise returns the content from the
    /// previous save.
    pub fn observe_save(&mut self, path: impl Into<PathBuf>, content: String) -> Option<String> {
        self.snapshots.insert(path.into(), content)
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.snapshots.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
