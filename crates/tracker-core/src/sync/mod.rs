//! Log synchronization with the remote store
//!
//! One flush cycle moves through `ReadingRemote -> Appending -> Writing` and
//! ends in success or failure. There are no retries: a failed cycle's records
//! are dropped and the next cycle starts fresh.

mod engine;

pub use engine::{FlushOutcome, LogSynchronizer};
