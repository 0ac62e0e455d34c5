//! LogSynchronizer implementation

use std::sync::Arc;

use tracing::{debug, info};
use tracker_remote::{RemoteLogStore, RepositoryRef, Revision};

use crate::config::TrackerConfig;
use crate::entry::{LogEntry, append_entry};
use crate::record::ChangeRecord;
use crate::Result;

const APPEND_MESSAGE: &str = "Appending to logs";
const CREATE_MESSAGE: &str = "Creating logs file";

/// Result of a flush cycle that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing to flush; no remote call was made
    Skipped,
    /// The log did not exist and was created
    Created { records: usize, revision: Revision },
    /// An entry was appended to the existing log
    Appended { records: usize, revision: Revision },
}

impl FlushOutcome {
    /// Number of records written by this cycle
    pub fn records(&self) -> usize {
        match self {
            Self::Skipped => 0,
            Self::Created { records, .. } | Self::Appended { records, .. } => *records,
        }
    }
}

/// Appends drained records to the remote log
///
/// The repository URL is parsed on every flush so a bad URL fails that
/// cycle before any network call. The revision used for the conditional
/// write is always the one read in the same cycle.
pub struct LogSynchronizer {
    store: Arc<dyn RemoteLogStore>,
    repository_url: String,
    resource: String,
}

impl LogSynchronizer {
    /// Create a new LogSynchronizer
    ///
    /// # Arguments
    ///
    /// * `store` - Remote store holding the log
    /// * `repository_url` - Repository URL, parsed at flush time
    /// * `resource` - Name of the log resource, e.g. `logs.txt`
    pub fn new(
        store: Arc<dyn RemoteLogStore>,
        repository_url: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            store,
            repository_url: repository_url.into(),
            resource: resource.into(),
        }
    }

    pub fn from_config(store: Arc<dyn RemoteLogStore>, config: &TrackerConfig) -> Self {
        Self::new(store, config.repository_url.clone(), config.log_file.clone())
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Flush drained records to the remote log.
    ///
    /// The caller has already drained its buffer; on error the records are
    /// not handed back.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository URL is invalid, or if reading or
    /// writing the remote log fails (transport, auth, revision conflict).
    pub async fn flush(&self, records: Vec<ChangeRecord>) -> Result<FlushOutcome> {
        if records.is_empty() {
            debug!("No records to flush");
            return Ok(FlushOutcome::Skipped);
        }

        let repo = RepositoryRef::parse(&self.repository_url)?;
        let count = records.len();

        debug!(repo = %repo, resource = %self.resource, "Reading remote log");
        let state = self.store.read_state(&repo, &self.resource).await?;

        debug!(records = count, exists = state.exists(), "Appending log entry");
        let entry = LogEntry::new(records).render();
        let existing = state.exists().then_some(state.content.as_str());
        let content = append_entry(existing, &entry);

        let message = if state.exists() {
            APPEND_MESSAGE
        } else {
            CREATE_MESSAGE
        };
        debug!(revision = ?state.revision, "Writing remote log");
        let revision = self
            .store
            .put_content(
                &repo,
                &self.resource,
                &content,
                state.revision.as_ref(),
                message,
            )
            .await?;

        info!(
            "Flushed {} change record(s) to {}/{}",
            count, repo, self.resource
        );

        Ok(if state.exists() {
            FlushOutcome::Appended {
                records: count,
                revision,
            }
        } else {
            FlushOutcome::Created {
                records: count,
                revision,
            }
        })
    }
}
