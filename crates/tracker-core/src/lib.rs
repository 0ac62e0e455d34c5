//! Change tracking and log synchronization for Activity Tracker
//!
//! This crate turns editor file events into buffered change records and
//! periodically appends them to a remote log:
//!
//! - **Tracker**: snapshots per path, line diffs on save, structural events
//! - **ChangeBuffer**: insertion-ordered records with atomic drain
//! - **LogSynchronizer**: read remote state, append one entry, conditional write
//! - **TrackerService**: the single task that owns the tracker and runs the
//!   flush timer
//!
//! # Architecture
//!
//! ```text
//!                 tracker-cli
//!                      |
//!                 tracker-core
//!                      |
//!     +----------------+----------------+
//!     |                |                |
//! tracker-diff    tracker-fs     tracker-remote
//! ```

pub mod buffer;
pub mod config;
pub mod entry;
pub mod error;
pub mod notifier;
pub mod record;
pub mod service;
pub mod snapshot;
pub mod sync;
pub mod tracker;

pub use buffer::ChangeBuffer;
pub use config::{ConfigOverrides, TrackerConfig};
pub use entry::{LogEntry, append_entry};
pub use error::{Error, Result};
pub use notifier::{Notifier, TracingNotifier};
pub use record::{ChangeAction, ChangePayload, ChangeRecord};
pub use service::{TrackerEvent, TrackerHandle, TrackerService};
pub use snapshot::SnapshotTracker;
pub use sync::{FlushOutcome, LogSynchronizer};
pub use tracker::Tracker;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_display_transparently() {
        let error = Error::from(tracker_remote::Error::InvalidRepositoryReference {
            url: "https://example.com/nope".to_string(),
        });

        let display = format!("{}", error);
        assert!(
            display.contains("https://example.com/nope"),
            "Error display should contain the url, got: {}",
            display
        );
    }
}
