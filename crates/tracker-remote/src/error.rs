//! Error types for tracker-remote

/// Result type for tracker-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the remote log store
///
/// A missing resource is not an error: reads return `None` for it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid repository reference: {url} (expected github.com/<owner>/<repo>)")]
    InvalidRepositoryReference { url: String },

    #[error("Revision conflict writing {resource}: {message}")]
    Conflict { resource: String, message: String },

    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Unexpected response from {url}: {status} {body}")]
    UnexpectedStatus { url: String, status: u16, body: String },

    #[error("Failed to decode {resource}: {message}")]
    Decode { resource: String, message: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Whether this error means the write lost a revision race
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
