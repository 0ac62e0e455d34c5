//! Change segment types and their log rendering

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a run of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Lines present only in the new snapshot
    Added,
    /// Lines present only in the old snapshot
    Deleted,
    /// Lines present in both snapshots with different text
    Modified,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Deleted => "Deleted",
            Self::Modified => "Modified",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous run of changed lines between two snapshots
///
/// Line numbers are 1-based and both ends are inclusive. `before` holds the
/// old text of the run (Deleted, Modified) and `after` the new text (Added,
/// Modified); every line in either is terminated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSegment {
    pub kind: SegmentKind,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl ChangeSegment {
    pub fn added(start_line: usize, end_line: usize, after: String) -> Self {
        debug_assert!(start_line >= 1 && start_line <= end_line);
        Self {
            kind: SegmentKind::Added,
            start_line,
            end_line,
            before: None,
            after: Some(after),
        }
    }

    pub fn deleted(start_line: usize, end_line: usize, before: String) -> Self {
        debug_assert!(start_line >= 1 && start_line <= end_line);
        Self {
            kind: SegmentKind::Deleted,
            start_line,
            end_line,
            before: Some(before),
            after: None,
        }
    }

    pub fn modified(start_line: usize, end_line: usize, before: String, after: String) -> Self {
        debug_assert!(start_line >= 1 && start_line <= end_line);
        Self {
            kind: SegmentKind::Modified,
            start_line,
            end_line,
            before: Some(before),
            after: Some(after),
        }
    }

    /// Number of lines covered by this segment
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

impl fmt::Display for ChangeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} from line {} to {}",
            self.kind, self.start_line, self.end_line
        )?;
        let before = self.before.as_deref().unwrap_or_default();
        let after = self.after.as_deref().unwrap_or_default();
        match self.kind {
            SegmentKind::Added => f.write_str(after),
            SegmentKind::Deleted => f.write_str(before),
            SegmentKind::Modified => write!(f, "**FROM**\n{}**TO**\n{}", before, after),
        }
    }
}

/// Render segments for a log record, one block per segment joined by `\n`
pub fn render_segments(segments: &[ChangeSegment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
