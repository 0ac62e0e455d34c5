//! Filesystem helpers for Activity Tracker
//!
//! Best-effort reads for watched files, atomic writes, and format-agnostic
//! configuration loading.

pub mod config;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
