//! In-memory [`RemoteLogStore`] with call recording and failure injection.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use tracker_remote::{Error, RemoteLogStore, RepositoryRef, Result, Revision};

/// A call observed by [`MemoryLogStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchRevision { resource: String },
    FetchContent { resource: String },
    Put {
        resource: String,
        revision: Option<String>,
        message: String,
    },
}

/// Failure to inject into the next write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    Conflict,
    Auth,
    ServerError,
}

#[derive(Debug, Clone)]
struct StoredFile {
    content: String,
    revision: Revision,
}

/// In-memory remote store with GitHub-like revision semantics.
///
/// - an update must carry the current revision
/// - a create must not target an existing resource
///
/// Writes can be held open with [`block_writes`](Self::block_writes) to
/// test behavior while a flush is in flight.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    files: Mutex<HashMap<String, StoredFile>>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<VecDeque<StoreFailure>>,
    next_revision: AtomicU64,
    writes_blocked: AtomicBool,
    write_started: Notify,
    write_released: Notify,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(repo: &RepositoryRef, resource: &str) -> String {
        format!("{}/{}", repo, resource)
    }

    fn new_revision(&self) -> Revision {
        let n = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        Revision::new(format!("rev-{}", n))
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Seed or overwrite a resource as another writer would.
    pub fn external_write(&self, repo: &RepositoryRef, resource: &str, content: &str) -> Revision {
        let revision = self.new_revision();
        self.files.lock().unwrap().insert(
            Self::key(repo, resource),
            StoredFile {
                content: content.to_string(),
                revision: revision.clone(),
            },
        );
        revision
    }

    pub fn content_of(&self, repo: &RepositoryRef, resource: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&Self::key(repo, resource))
            .map(|f| f.content.clone())
    }

    pub fn revision_of(&self, repo: &RepositoryRef, resource: &str) -> Option<Revision> {
        self.files
            .lock()
            .unwrap()
            .get(&Self::key(repo, resource))
            .map(|f| f.revision.clone())
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn puts(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, StoreCall::Put { .. }))
            .collect()
    }

    /// Make the next write fail with `failure`.
    pub fn fail_next_write(&self, failure: StoreFailure) {
        self.failures.lock().unwrap().push_back(failure);
    }

    /// Hold every write open until [`release_write`](Self::release_write).
    pub fn block_writes(&self) {
        self.writes_blocked.store(true, Ordering::SeqCst);
    }

    /// Wait until a write is being held open.
    pub async fn wait_for_blocked_write(&self) {
        self.write_started.notified().await;
    }

    /// Let one held write proceed and stop holding later writes.
    pub fn release_write(&self) {
        self.writes_blocked.store(false, Ordering::SeqCst);
        self.write_released.notify_one();
    }
}

#[async_trait]
impl RemoteLogStore for MemoryLogStore {
    async fn fetch_revision(&self, repo: &RepositoryRef, resource: &str) -> Result<Option<Revision>> {
        self.record(StoreCall::FetchRevision {
            resource: resource.to_string(),
        });
        Ok(self.revision_of(repo, resource))
    }

    async fn fetch_content(&self, repo: &RepositoryRef, resource: &str) -> Result<Option<String>> {
        self.record(StoreCall::FetchContent {
            resource: resource.to_string(),
        });
        Ok(self.content_of(repo, resource))
    }

    async fn put_content(
        &self,
        repo: &RepositoryRef,
        resource: &str,
        content: &str,
        revision: Option<&Revision>,
        message: &str,
    ) -> Result<Revision> {
        self.record(StoreCall::Put {
            resource: resource.to_string(),
            revision: revision.map(|r| r.to_string()),
            message: message.to_string(),
        });

        if self.writes_blocked.load(Ordering::SeqCst) {
            self.write_started.notify_one();
            self.write_released.notified().await;
        }

        let failure = self.failures.lock().unwrap().pop_front();
        match failure {
            Some(StoreFailure::Conflict) => {
                return Err(Error::Conflict {
                    resource: resource.to_string(),
                    message: "injected conflict".to_string(),
                });
            }
            Some(StoreFailure::Auth) => {
                return Err(Error::Auth {
                    status: 401,
                    message: "Bad credentials".to_string(),
                });
            }
            Some(StoreFailure::ServerError) => {
                return Err(Error::UnexpectedStatus {
                    url: Self::key(repo, resource),
                    status: 500,
                    body: "injected server error".to_string(),
                });
            }
            None => {}
        }

        let key = Self::key(repo, resource);
        let mut files = self.files.lock().unwrap();
        let current = files.get(&key).map(|f| f.revision.clone());
        if current.as_ref() != revision {
            return Err(Error::Conflict {
                resource: resource.to_string(),
                message: format!("expected {:?}, current {:?}", revision, current),
            });
        }

        let new_revision = self.new_revision();
        files.insert(
            key,
            StoredFile {
                content: content.to_string(),
                revision: new_revision.clone(),
            },
        );
        Ok(new_revision)
    }
}
