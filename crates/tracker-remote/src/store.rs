//! RemoteLogStore trait and shared types

use std::fmt;

use async_trait::async_trait;

use crate::{RepositoryRef, Result};

/// Opaque version token for a remote resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Revision {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Current state of a remote resource as read at the start of a flush
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteLogState {
    /// `None` when the resource does not exist yet
    pub revision: Option<Revision>,
    pub content: String,
}

impl RemoteLogState {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn exists(&self) -> bool {
        self.revision.is_some()
    }
}

/// A remote store holding named text resources with revision-checked writes
///
/// Implementations must reject a write whose revision is not the current
/// one, and must reject a revision-less write to a resource that exists.
#[async_trait]
pub trait RemoteLogStore: Send + Sync {
    /// Current revision of the resource, or `None` if it does not exist
    async fn fetch_revision(&self, repo: &RepositoryRef, resource: &str) -> Result<Option<Revision>>;

    /// Decoded text of the resource, or `None` if it does not exist
    async fn fetch_content(&self, repo: &RepositoryRef, resource: &str) -> Result<Option<String>>;

    /// Replace the resource's content.
    ///
    /// With `revision` the write is an update that must match the current
    /// revision; without it the write creates the resource. Returns the new
    /// revision.
    async fn put_content(
        &self,
        repo: &RepositoryRef,
        resource: &str,
        content: &str,
        revision: Option<&Revision>,
        message: &str,
    ) -> Result<Revision>;

    /// Read revision then content. Content is only fetched when the
    /// resource exists.
    async fn read_state(&self, repo: &RepositoryRef, resource: &str) -> Result<RemoteLogState> {
        let Some(revision) = self.fetch_revision(repo, resource).await? else {
            return Ok(RemoteLogState::missing());
        };

        let content = self
            .fetch_content(repo, resource)
            .await?
            .unwrap_or_default();

        Ok(RemoteLogState {
            revision: Some(revision),
            content,
        })
    }
}
