//! Watch command implementation
//!
//! Wires the filesystem watcher to a [`TrackerService`] backed by the GitHub
//! contents API and runs until Ctrl-C.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use tracker_core::{ConfigOverrides, LogSynchronizer, TrackerConfig, TrackerService};
use tracker_remote::{GitHubContentsStore, RepositoryRef};

use crate::cli::WatchArgs;
use crate::error::{CliError, Result};
use crate::notifier::ConsoleNotifier;
use crate::watcher::{DEFAULT_DEBOUNCE, FileWatcher};

pub fn run_watch(config_path: &Path, args: &WatchArgs) -> Result<()> {
    let config = resolve_config(config_path, args)?;
    let root = args.root.canonicalize().map_err(|e| {
        CliError::user(format!("Cannot watch {}: {}", args.root.display(), e))
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(config, root))
}

/// File values with flag and environment overrides applied, validated
fn resolve_config(config_path: &Path, args: &WatchArgs) -> Result<TrackerConfig> {
    let mut config = TrackerConfig::load_or_default(config_path)?;
    config.merge(&ConfigOverrides {
        repository_url: args.repo.clone(),
        access_token: args.token.clone(),
        flush_interval_minutes: args.interval,
        ..Default::default()
    });
    config.validate()?;
    // Fail at startup rather than on the first flush
    RepositoryRef::parse(&config.repository_url)?;
    Ok(config)
}

async fn watch(config: TrackerConfig, root: PathBuf) -> Result<()> {
    let store = GitHubContentsStore::with_base_url(&config.access_token, &config.api_base_url)?;
    let synchronizer = LogSynchronizer::from_config(Arc::new(store), &config);
    let (service, handle) = TrackerService::new(
        synchronizer,
        config.flush_interval(),
        Arc::new(ConsoleNotifier),
    );
    let service_task = tokio::spawn(service.run());
    let watcher = FileWatcher::start(&root, handle.clone(), DEFAULT_DEBOUNCE)?;

    println!(
        "{} {} -> {}/{} every {} min (Ctrl-C to stop)",
        "Watching".green().bold(),
        root.display().to_string().yellow(),
        config.repository_url.cyan(),
        config.log_file,
        config.flush_interval_minutes
    );

    tokio::signal::ctrl_c().await?;
    drop(watcher);

    println!("{} flushing pending changes...", "Stopping:".bold());
    if let Err(e) = handle.shutdown() {
        tracing::debug!("Service already stopped: {}", e);
    }
    service_task
        .await
        .map_err(|e| CliError::user(format!("Tracker task failed: {}", e)))?;
    Ok(())
}
