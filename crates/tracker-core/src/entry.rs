//! Log entry formatting

use chrono::{DateTime, Local};

use crate::record::ChangeRecord;

/// Timestamp layout in entry headers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One flush cycle's worth of records, rendered as a single text block
///
/// ```text
/// --- Log Entry at 2024-05-01 14:03:22 ---
/// Added, file /work/src/new.rs
/// Modified, in file /work/src/lib.rs: 
/// Changes: Modified from line 2 to 2
/// ...
/// ```
#[derive(Debug, Clone)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    records: Vec<ChangeRecord>,
}

impl LogEntry {
    /// Create an entry stamped with the current local time
    pub fn new(records: Vec<ChangeRecord>) -> Self {
        Self::with_timestamp(Local::now(), records)
    }

    pub fn with_timestamp(timestamp: DateTime<Local>, records: Vec<ChangeRecord>) -> Self {
        Self { timestamp, records }
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn render(&self) -> String {
        let mut text = format!(
            "--- Log Entry at {} ---\n",
            self.timestamp.format(TIMESTAMP_FORMAT)
        );
        for record in &self.records {
            text.push_str(&record.log_line());
            text.push('\n');
        }
        text
    }
}

/// Append a rendered entry to existing log content.
///
/// Existing content is kept byte for byte; the entry follows after one
/// blank line. With no existing content the entry stands alone.
pub fn append_entry(existing: Option<&str>, entry: &str) -> String {
    match existing {
        None | Some("") => entry.to_string(),
        Some(existing) => {
            let mut text = String::with_capacity(existing.len() + entry.len() + 2);
            text.push_str(existing);
            if !existing.ends_with('\n') {
                text.push('\n');
            }
            text.push('\n');
            text.push_str(entry);
            text
        }
    }
}
