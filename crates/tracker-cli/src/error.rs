//! Error types for tracker-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tracker-core
    #[error(transparent)]
    Core(#[from] tracker_core::Error),

    /// Error from tracker-fs
    #[error(transparent)]
    Fs(#[from] tracker_fs::Error),

    /// Error from tracker-remote
    #[error(transparent)]
    Remote(#[from] tracker_remote::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Filesystem watcher error
    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
