//! Change records held by the buffer

use std::fmt;
use std::path::{Path, PathBuf};

use tracker_diff::{ChangeSegment, render_segments};

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    /// The file was created
    Created,
    /// The file was deleted
    Deleted,
    /// A save changed the file's lines
    ContentChanged,
}

impl ChangeAction {
    /// Label used in the remote log
    pub fn log_label(&self) -> &'static str {
        match self {
            Self::Created => "Added",
            Self::Deleted => "Deleted",
            Self::ContentChanged => "Modified",
        }
    }

    /// Whether this is a create or delete rather than a content change
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::ContentChanged)
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.log_label())
    }
}

/// Data carried by a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePayload {
    /// Raw file content read when a structural event arrived
    Content(String),
    /// Line segments produced by diffing two saves
    Segments(Vec<ChangeSegment>),
}

/// One buffered change to one file
///
/// Records are immutable once built: fields are only exposed through
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    path: PathBuf,
    action: ChangeAction,
    payload: ChangePayload,
}

impl ChangeRecord {
    /// A structural record for a create or delete
    pub fn structural(action: ChangeAction, path: impl Into<PathBuf>, content: String) -> Self {
        assert!(
            action.is_structural(),
            "content changes must be built with ChangeRecord::content_changed"
        );
        Self {
            path: path.into(),
            action,
            payload: ChangePayload::Content(content),
        }
    }

    pub fn created(path: impl Into<PathBuf>, content: String) -> Self {
        Self::structural(ChangeAction::Created, path, content)
    }

    pub fn deleted(path: impl Into<PathBuf>, content: String) -> Self {
        Self::structural(ChangeAction::Deleted, path, content)
    }

    /// A content record. `segments` must not be empty.
    pub fn content_changed(path: impl Into<PathBuf>, segments: Vec<ChangeSegment>) -> Self {
        assert!(!segments.is_empty(), "a content change needs at least one segment");
        Self {
            path: path.into(),
            action: ChangeAction::ContentChanged,
            payload: ChangePayload::Segments(segments),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn action(&self) -> ChangeAction {
        self.action
    }

    pub fn payload(&self) -> &ChangePayload {
        &self.payload
    }

    /// Segments of a content record, empty for structural records
    pub fn segments(&self) -> &[ChangeSegment] {
        match &self.payload {
            ChangePayload::Segments(segments) => segments,
            ChangePayload::Content(_) => &[],
        }
    }

    /// Render this record as it appears in a log entry, without the
    /// trailing newline
    pub fn log_line(&self) -> String {
        match &self.payload {
            ChangePayload::Content(_) => {
                format!("{}, file {}", self.action, self.path.display())
            }
            ChangePayload::Segments(segments) => format!(
                "{}, in file {}: \nChanges: {}",
                self.action,
                self.path.display(),
                render_segments(segments)
            ),
        }
    }
}
