//! Line-position diffing for Activity Tracker
//!
//! Turns two whole-file snapshots into an ordered list of added, deleted and
//! modified line runs. The comparison is aligned by line position rather than
//! by edit distance: one linear pass, no move or reorder detection.
//!
//! ```
//! use tracker_diff::{SegmentKind, diff};
//!
//! let segments = diff(&["a", "b", "c"], &["a", "x", "c"]);
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].kind, SegmentKind::Modified);
//! assert_eq!((segments[0].start_line, segments[0].end_line), (2, 2));
//! ```

pub mod line_diff;
pub mod segment;

pub use line_diff::{diff, diff_text, split_lines};
pub use segment::{ChangeSegment, SegmentKind, render_segments};
