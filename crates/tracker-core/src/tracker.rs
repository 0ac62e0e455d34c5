//! Save handler turning editor triggers into change records

use std::path::PathBuf;

use tracing::debug;
use tracker_diff::diff_text;

use crate::buffer::ChangeBuffer;
use crate::record::{ChangeAction, ChangeRecord};
use crate::snapshot::SnapshotTracker;

/// Owns the snapshots and the pending-change buffer
///
/// Every method runs to completion without suspending, so a single owning
/// task can call them between flushes without locks.
#[derive(Debug, Default)]
pub struct Tracker {
    snapshots: SnapshotTracker,
    buffer: ChangeBuffer,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file appeared in the workspace
    pub fn file_created(&mut self, path: impl Into<PathBuf>) {
        self.buffer
            .append_structural(ChangeAction::Created, path, None);
    }

    /// A file was removed from the workspace
    pub fn file_deleted(&mut self, path: impl Into<PathBuf>) {
        self.buffer
            .append_structural(ChangeAction::Deleted, path, None);
    }

    /// A file was saved with `content`.
    ///
    /// The first save of a path only records a snapshot. Later saves diff
    /// against the previous snapshot and buffer one record when any line
    /// changed. Returns the number of segments buffered.
    pub fn file_saved(&mut self, path: impl Into<PathBuf>, content: String) -> usize {
        let path = path.into();
        let segments = self
            .snapshots
            .get(&path)
            .map(|previous| diff_text(previous, &content));
        self.snapshots.observe_save(path.clone(), content);

        let Some(segments) = segments else {
            debug!(path = %path.display(), "First save, snapshot recorded");
            return 0;
        };
        if segments.is_empty() {
            debug!(path = %path.display(), "Save without line changes");
            return 0;
        }

        let count = segments.len();
        self.buffer
            .append(ChangeRecord::content_changed(path, segments));
        count
    }

    /// Take every pending record
    pub fn drain(&mut self) -> Vec<ChangeRecord> {
        self.buffer.drain_all()
    }

    pub fn buffer(&self) -> &ChangeBuffer {
        &self.buffer
    }

    pub fn snapshots(&self) -> &SnapshotTracker {
        &self.snapshots
    }
}
