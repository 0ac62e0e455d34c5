//! Remote log store access for Activity Tracker
//!
//! The tracker appends to a single text resource held in a remote,
//! version-controlled store. Writes are conditional on a revision token read
//! in the same flush cycle, so a concurrent writer causes a rejected write
//! instead of lost data.
//!
//! - [`RemoteLogStore`] is the seam the synchronizer talks to
//! - [`GitHubContentsStore`] implements it over the GitHub contents API
//! - [`RepositoryRef`] parses the configured repository URL

pub mod error;
pub mod github;
pub mod repository;
pub mod store;

pub use error::{Error, Result};
pub use github::GitHubContentsStore;
pub use repository::RepositoryRef;
pub use store::{RemoteLogState, RemoteLogStore, Revision};
