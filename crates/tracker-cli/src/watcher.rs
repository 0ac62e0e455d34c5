//! Filesystem watcher feeding the tracker service
//!
//! Raw notify events are debounced per path, so a save that reaches disk as
//! a truncate followed by several writes arrives as a single change. Each
//! debounced path is then classified by what is on disk and forwarded
//! through a [`TrackerHandle`], which never blocks.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, DebouncedEventKind, Debouncer, new_debouncer};
use tracing::{debug, error};
use tracker_core::TrackerHandle;
use tracker_fs::io::read_text;
use walkdir::WalkDir;

use crate::error::Result;

/// Quiet period after the last write before a path is reported
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Directory names whose contents are never tracked
const IGNORED_DIRS: &[&str] = &[".git", "target"];

/// A filesystem event as the tracker sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Created(PathBuf),
    Deleted(PathBuf),
    Saved(PathBuf),
}

/// What a debounced path looks like on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    File,
    Directory,
    Missing,
}

impl PathState {
    fn of(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(_) => Self::File,
            Err(_) => Self::Missing,
        }
    }
}

/// Turns debounced paths into tracker events
///
/// Remembers which files exist under the root. A file that appears is a
/// create followed by its first save, a known file that changes is a save,
/// and a known file or directory that vanishes deletes every file it held.
/// A file created and removed within one window produces nothing.
#[derive(Debug)]
pub struct Classifier {
    root: PathBuf,
    known: HashSet<PathBuf>,
}

impl Classifier {
    /// Seed with the files already under `root`
    pub fn scan(root: &Path) -> Self {
        let known = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_ignored_name(entry.file_name()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();
        Self {
            root: root.to_path_buf(),
            known,
        }
    }

    pub fn classify(&mut self, path: &Path, state: PathState) -> Vec<FileEvent> {
        if self.is_ignored(path) {
            return Vec::new();
        }

        match state {
            PathState::Directory => Vec::new(),
            PathState::File => {
                if self.known.insert(path.to_path_buf()) {
                    vec![
                        FileEvent::Created(path.to_path_buf()),
                        FileEvent::Saved(path.to_path_buf()),
                    ]
                } else {
                    vec![FileEvent::Saved(path.to_path_buf())]
                }
            }
            PathState::Missing => {
                let mut gone: Vec<PathBuf> = self
                    .known
                    .iter()
                    .filter(|known| known.starts_with(path))
                    .cloned()
                    .collect();
                gone.sort();
                for removed in &gone {
                    self.known.remove(removed);
                }
                gone.into_iter().map(FileEvent::Deleted).collect()
            }
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.components().any(|component| match component {
            Component::Normal(name) => is_ignored_name(name),
            _ => false,
        })
    }
}

fn is_ignored_name(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| IGNORED_DIRS.contains(&n))
}

/// Keeps the underlying watcher alive; dropping it stops delivery
pub struct FileWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl FileWatcher {
    /// Watch `root` recursively and forward debounced events to `handle`
    pub fn start(root: &Path, handle: TrackerHandle, debounce: Duration) -> Result<Self> {
        let mut classifier = Classifier::scan(root);
        debug!(
            "Watching {} ({} existing files)",
            root.display(),
            classifier.known.len()
        );

        let mut debouncer = new_debouncer(debounce, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    for event in events {
                        // Still being written; the final event follows
                        if matches!(event.kind, DebouncedEventKind::AnyContinuous) {
                            continue;
                        }
                        let state = PathState::of(&event.path);
                        for file_event in classifier.classify(&event.path, state) {
                            dispatch(&handle, file_event);
                        }
                    }
                }
                Err(e) => error!("File watcher error: {}", e),
            }
        })?;
        debouncer
            .watcher()
            .watch(root, RecursiveMode::Recursive)?;

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

fn dispatch(handle: &TrackerHandle, event: FileEvent) {
    let sent = match event {
        FileEvent::Created(path) => handle.file_created(path),
        FileEvent::Deleted(path) => handle.file_deleted(path),
        FileEvent::Saved(path) => match read_text(&path) {
            Ok(content) => handle.file_saved(path, content),
            Err(e) => {
                debug!("Skipping unreadable save: {}", e);
                return;
            }
        },
    };

    if let Err(e) = sent {
        debug!("Dropping file event: {}", e);
    }
}
