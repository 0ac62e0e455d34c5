//! Error types for tracker-core

/// Result type for tracker-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tracker-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is missing a required value or holds an invalid one
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// No platform configuration directory could be determined
    #[error("Could not determine a configuration directory")]
    NoConfigDir,

    /// The service task has exited and no longer accepts events
    #[error("Tracker service has stopped")]
    ServiceStopped,

    // Transparent wrappers for underlying crate errors
    /// Remote store error from tracker-remote
    #[error(transparent)]
    Remote(#[from] tracker_remote::Error),

    /// Filesystem error from tracker-fs
    #[error(transparent)]
    Fs(#[from] tracker_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
