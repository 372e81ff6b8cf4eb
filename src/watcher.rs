use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};

/// File change notification
#[derive(Debug, Clone, PartialEq)]
pub enum FileEvent {
    Modified,
    Error(String),
}

/// Watches a single log file for changes.
///
/// The parent directory is watched rather than the file itself so that
/// writers replacing the file atomically (write temp + rename) keep
/// producing events. Only events naming the watched file are forwarded.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<FileEvent>,
}

impl FileWatcher {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve: {}", path.display()))?;
        let file_name: OsString = path
            .file_name()
            .with_context(|| format!("Not a file: {}", path.display()))?
            .to_os_string();
        let dir = path
            .parent()
            .with_context(|| format!("No parent directory: {}", path.display()))?
            .to_path_buf();

        let (tx, rx) = channel();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if !matches!(
                        event.kind,
                        EventKind::Modify(_) | EventKind::Create(_)
                    ) {
                        return;
                    }
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()));
                    if ours {
                        let _ = tx.send(FileEvent::Modified);
                    }
                }
                Err(e) => {
                    let _ = tx.send(FileEvent::Error(e.to_string()));
                }
            }
        })
        .context("Failed to create file watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch: {}", dir.display()))?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Check if there are any pending file events (non-blocking)
    pub fn try_recv(&self) -> Option<FileEvent> {
        self.receiver.try_recv().ok()
    }
}
