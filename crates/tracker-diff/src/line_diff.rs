//! Position-aligned line diff

use crate::segment::ChangeSegment;

/// Split text into lines on `\n`, keeping a trailing empty line.
///
/// `"a\nb\n"` yields `["a", "b", ""]` and `""` yields `[""]`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Diff two texts line by line.
pub fn diff_text(old: &str, new: &str) -> Vec<ChangeSegment> {
    diff(&split_lines(old), &split_lines(new))
}

/// Diff two line sequences by position.
///
/// A line counts as present when it exists and is non-empty. Walking a
/// single index, each position where the sequences differ starts a run:
///
/// - absent in `old`, present in `new`: an Added run
/// - present in `old`, absent in `new`: a Deleted run
/// - present in both with different text: a Modified run
///
/// A run extends while its starting condition holds and scanning resumes
/// after it. A position where one side is empty and the other is past the
/// end (a trailing newline added or removed) yields no segment.
///
/// Blank lines therefore split runs, and a line inserted mid-file reads as
/// a modification of every line after it.
pub fn diff<A, B>(old: &[A], new: &[B]) -> Vec<ChangeSegment>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let len = old.len().max(new.len());
    let mut segments = Vec::new();
    let mut i = 0;

    while i < len {
        if raw(old, i) == raw(new, i) {
            i += 1;
            continue;
        }

        match (present(old, i), present(new, i)) {
            (None, Some(_)) => {
                let end = run_end(i, len, |j| present(old, j).is_none() && present(new, j).is_some());
                segments.push(ChangeSegment::added(i + 1, end, join(&new[i..end])));
                i = end;
            }
            (Some(_), None) => {
                let end = run_end(i, len, |j| present(old, j).is_some() && present(new, j).is_none());
                segments.push(ChangeSegment::deleted(i + 1, end, join(&old[i..end])));
                i = end;
            }
            (Some(_), Some(_)) => {
                let end = run_end(i, len, |j| match (present(old, j), present(new, j)) {
                    (Some(o), Some(n)) => o != n,
                    _ => false,
                });
                segments.push(ChangeSegment::modified(
                    i + 1,
                    end,
                    join(&old[i..end]),
                    join(&new[i..end]),
                ));
                i = end;
            }
            (None, None) => i += 1,
        }
    }

    segments
}

fn raw<S: AsRef<str>>(lines: &[S], index: usize) -> Option<&str> {
    lines.get(index).map(AsRef::as_ref)
}

fn present<S: AsRef<str>>(lines: &[S], index: usize) -> Option<&str> {
    raw(lines, index).filter(|line| !line.is_empty())
}

/// First index at or after `start` where `holds` is false, capped at `len`
fn run_end(start: usize, len: usize, holds: impl Fn(usize) -> bool) -> usize {
    let mut end = start;
    while end < len && holds(end) {
        end += 1;
    }
    debug_assert!(end > start, "a run must cover at least one line");
    end
}

fn join<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegmentKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_inputs_yield_nothing() {
        assert!(diff(&["a", "b"], &["a", "b"]).is_empty());
    }

    #[test]
    fn modified_single_line() {
        let segments = diff(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            segments,
            vec![ChangeSegment::modified(2, 2, "b\n".into(), "x\n".into())]
        );
    }

    #[test]
    fn appended_lines_form_one_added_run() {
        let segments = diff(&["a", "b"], &["a", "b", "c", "d"]);
        assert_eq!(segments, vec![ChangeSegment::added(3, 4, "c\nd\n".into())]);
    }

    #[test]
    fn truncated_lines_form_one_deleted_run() {
        let segments = diff(&["a", "b", "c"], &["a"]);
        assert_eq!(segments, vec![ChangeSegment::deleted(2, 3, "b\nc\n".into())]);
    }

    #[test]
    fn blank_line_filled_in_is_added() {
        let segments = diff(&["a", "", "c"], &["a", "b", "c"]);
        assert_eq!(segments, vec![ChangeSegment::added(2, 2, "b\n".into())]);
    }

    #[test]
    fn line_cleared_to_blank_is_deleted() {
        let segments = diff(&["a", "b", "c"], &["a", "", "c"]);
        assert_eq!(segments, vec![ChangeSegment::deleted(2, 2, "b\n".into())]);
    }

    #[test]
    fn trailing_newline_change_is_ignored() {
        assert!(diff_text("a\nb", "a\nb\n").is_empty());
        assert!(diff_text("a\nb\n", "a\nb").is_empty());
    }

    #[test]
    fn mid_file_insert_cascades_into_modification() {
        let segments = diff(&["a", "b", "c"], &["a", "new", "b", "c"]);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].kind, SegmentKind::Modified);
        assert_eq!((segments[0].start_line, segments[0].end_line), (2, 3));
        assert_eq!(segments[1], ChangeSegment::added(4, 4, "c\n".into()));
    }

    #[test]
    fn runs_resume_after_unchanged_lines() {
        let segments = diff(&["a", "b", "c", "d"], &["x", "b", "c", "y"]);
        assert_eq!(
            segments,
            vec![
                ChangeSegment::modified(1, 1, "a\n".into(), "x\n".into()),
                ChangeSegment::modified(4, 4, "d\n".into(), "y\n".into()),
            ]
        );
    }

    #[test]
    fn modified_run_stops_at_matching_line() {
        let segments = diff(&["a", "b", "c"], &["x", "y", "c"]);
        assert_eq!(
            segments,
            vec![ChangeSegment::modified(1, 2, "a\nb\n".into(), "x\ny\n".into())]
        );
    }

    #[test]
    fn split_lines_keeps_trailing_empty() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn accepts_owned_and_borrowed_lines() {
        let old: Vec<String> = vec!["a".into()];
        let segments = diff(&old, &["b"]);
        assert_eq!(segments.len(), 1);
    }
}
