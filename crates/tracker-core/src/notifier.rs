//! User-facing flush notifications

use tracing::{error, info};

use crate::Error;
use crate::sync::FlushOutcome;

/// Receives the result of each flush cycle
///
/// A failed cycle produces exactly one `flush_failed` call.
pub trait Notifier: Send + Sync {
    fn flush_succeeded(&self, _outcome: &FlushOutcome) {}

    fn flush_failed(&self, error: &Error);
}

/// Reports flush results through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn flush_succeeded(&self, outcome: &FlushOutcome) {
        if outcome.records() > 0 {
            info!("Logs updated successfully ({} records)", outcome.records());
        }
    }

    fn flush_failed(&self, error: &Error) {
        error!("Error updating logs file: {}", error);
    }
}
