//! Shared harness for end-to-end service tests

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracker_core::{Error, FlushOutcome, LogSynchronizer, Notifier, TrackerHandle, TrackerService};
use tracker_remote::RemoteLogStore;

pub const REPO_URL: &str = "https://github.com/octo/journal.git";

pub type FlushResult = std::result::Result<FlushOutcome, String>;

/// Forwards every flush result to the test
pub struct ChannelNotifier(pub mpsc::UnboundedSender<FlushResult>);

impl Notifier for ChannelNotifier {
    fn flush_succeeded(&self, outcome: &FlushOutcome) {
        let _ = self.0.send(Ok(outcome.clone()));
    }

    fn flush_failed(&self, error: &Error) {
        let _ = self.0.send(Err(error.to_string()));
    }
}

/// Spawn a service over `store` with a timer long enough to never fire
pub fn spawn_service(
    store: Arc<dyn RemoteLogStore>,
) -> (TrackerHandle, mpsc::UnboundedReceiver<FlushResult>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let synchronizer = LogSynchronizer::new(store, REPO_URL, "logs.txt");
    let (service, handle) = TrackerService::new(
        synchronizer,
        Duration::from_secs(24 * 60 * 60),
        Arc::new(ChannelNotifier(tx)),
    );
    tokio::spawn(service.run());
    (handle, rx)
}

/// Split a log into entries, dropping the header line of each
pub fn entry_bodies(log: &str) -> Vec<Vec<String>> {
    let header = regex::Regex::new(r"^--- Log Entry at \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} ---$")
        .unwrap();
    let mut entries: Vec<Vec<String>> = Vec::new();
    for line in log.lines() {
        if header.is_match(line) {
            entries.push(Vec::new());
        } else if let Some(current) = entries.last_mut() {
            current.push(line.to_string());
        }
    }
    entries
}
