//! Diff command implementation
//!
//! Shows the segments a save from `old` to `new` would log.

use std::path::Path;

use colored::Colorize;
use tracker_diff::{ChangeSegment, SegmentKind, diff_text};
use tracker_fs::io::read_text;

use crate::error::Result;

pub fn run_diff(old: &Path, new: &Path, json: bool) -> Result<()> {
    let before = read_text(old)?;
    let after = read_text(new)?;
    let segments = diff_text(&before, &after);

    if json {
        let output = serde_json::json!({
            "has_changes": !segments.is_empty(),
            "segments": segments,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_segments(&segments);
    }
    Ok(())
}

fn print_segments(segments: &[ChangeSegment]) {
    if segments.is_empty() {
        println!("{} No line changes.", "OK".green().bold());
        return;
    }

    for segment in segments {
        let header = format!(
            "{} from line {} to {}",
            segment.kind, segment.start_line, segment.end_line
        );
        match segment.kind {
            SegmentKind::Added => println!("{}", header.green().bold()),
            SegmentKind::Deleted => println!("{}", header.red().bold()),
            SegmentKind::Modified => println!("{}", header.yellow().bold()),
        }
        if let Some(before) = &segment.before {
            for line in before.lines() {
                println!("{} {}", "-".red(), line.red());
            }
        }
        if let Some(after) = &segment.after {
            for line in after.lines() {
                println!("{} {}", "+".green(), line.green());
            }
        }
    }

    println!();
    println!(
        "{} segment(s), {} line(s)",
        segments.len(),
        segments.iter().map(ChangeSegment::line_count).sum::<usize>()
    );
}
