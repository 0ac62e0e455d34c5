//! Ordered buffer of pending change records

use std::path::PathBuf;

use tracing::debug;
use tracker_fs::io;

use crate::record::{ChangeAction, ChangeRecord};

/// Records waiting for the next flush, in arrival order across all paths
///
/// The buffer is owned by a single task, so `append` and `drain_all` never
/// interleave. Draining hands the records to the caller and leaves the
/// buffer empty for the next cycle.
#[derive(Debug, Default)]
pub struct ChangeBuffer {
    records: Vec<ChangeRecord>,
}

impl ChangeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the tail
    pub fn append(&mut self, record: ChangeRecord) {
        debug!(
            path = %record.path().display(),
            action = %record.action(),
            "Buffering change"
        );
        self.records.push(record);
    }

    /// Append a create or delete record.
    ///
    /// Without `content` the file is read from disk. A file that is already
    /// gone (the usual case for deletes) gives an empty payload.
    pub fn append_structural(
        &mut self,
        action: ChangeAction,
        path: impl Into<PathBuf>,
        content: Option<String>,
    ) {
        let path = path.into();
        let content = content.unwrap_or_else(|| io::read_text_or_empty(&path));
        self.append(ChangeRecord::structural(action, path, content));
    }

    /// Take every buffered record, leaving the buffer empty
    pub fn drain_all(&mut self) -> Vec<ChangeRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
