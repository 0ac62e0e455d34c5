//! Shared test utilities for the activity-tracker workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`store`]: [`MemoryLogStore`], an in-memory [`RemoteLogStore`] that
//!   records calls and enforces revision checks
//! - [`workspace`]: [`TestWorkspace`], a temporary directory of watched files
//!
//! [`RemoteLogStore`]: tracker_remote::RemoteLogStore

pub mod store;
pub mod workspace;

pub use store::{MemoryLogStore, StoreCall, StoreFailure};
pub use workspace::TestWorkspace;
