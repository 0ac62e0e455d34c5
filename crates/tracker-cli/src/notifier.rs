//! Terminal notifications for flush results

use colored::Colorize;
use tracker_core::{Error, FlushOutcome, Notifier};

/// Prints one line per flush cycle that wrote or failed
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn flush_succeeded(&self, outcome: &FlushOutcome) {
        match outcome {
            FlushOutcome::Skipped => {}
            FlushOutcome::Created { records, .. } => {
                println!("{} Created log with {} change(s)", "OK".green().bold(), records);
            }
            FlushOutcome::Appended { records, .. } => {
                println!("{} Logged {} change(s)", "OK".green().bold(), records);
            }
        }
    }

    fn flush_failed(&self, error: &Error) {
        eprintln!("{} {}", "Error updating logs file:".red().bold(), error);
    }
}
