//! Live tail: turn file-change notifications into debounced reloads and
//! keep the cursor where new content shows up.

use crate::navigation::Cursor;
use crate::watcher::{FileEvent, FileWatcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Notifications arriving within this window after an accepted one are dropped.
pub const DEBOUNCE_QUIET_PERIOD: Duration = Duration::from_millis(100);

/// Leading-edge debouncer: the first event of a burst passes, the rest of
/// the burst is dropped until the quiet period has elapsed.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    blocked_until: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            blocked_until: None,
        }
    }

    pub fn accept(&mut self, now: Instant) -> bool {
        if self.blocked_until.is_some_and(|until| now < until) {
            return false;
        }
        self.blocked_until = Some(now + self.quiet);
        true
    }

    /// Let the next event through immediately.
    pub fn reset(&mut self) {
        self.blocked_until = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_QUIET_PERIOD)
    }
}

/// Watch toggle, the single watcher for the loaded file, and its debouncer.
pub struct LiveTail {
    path: PathBuf,
    enabled: bool,
    watcher: Option<FileWatcher>,
    debounce: Debouncer,
}

impl LiveTail {
    pub fn new<P: AsRef<Path>>(path: P, enabled: bool) -> Self {
        let mut tail = Self {
            path: path.as_ref().to_path_buf(),
            enabled: false,
            watcher: None,
            debounce: Debouncer::default(),
        };
        tail.set_enabled(enabled);
        tail
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn watching on or off. The watcher is created on first enable and
    /// then kept for the life of the session.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled && self.watcher.is_none() {
            match FileWatcher::new(&self.path) {
                Ok(watcher) => self.watcher = Some(watcher),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "cannot watch file");
                }
            }
        }
        tracing::info!(path = %self.path.display(), enabled, "watch toggled");
    }

    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// The reload triggered by the last accepted event failed; the next
    /// notification must not be swallowed by the quiet period.
    pub fn reload_failed(&mut self) {
        self.debounce.reset();
    }

    /// Drain pending notifications; true when a reload should run now.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut events = Vec::new();
        if let Some(watcher) = &self.watcher {
            while let Some(event) = watcher.try_recv() {
                events.push(event);
            }
        }
        self.accept_events(events, now)
    }

    fn accept_events<I>(&mut self, events: I, now: Instant) -> bool
    where
        I: IntoIterator<Item = FileEvent>,
    {
        let mut reload = false;
        for event in events {
            match event {
                FileEvent::Modified if self.enabled => {
                    if self.debounce.accept(now) {
                        reload = true;
                    } else {
                        tracing::trace!("change notification debounced");
                    }
                }
                FileEvent::Modified => {}
                FileEvent::Error(err) => {
                    tracing::warn!(path = %self.path.display(), error = %err, "watcher error");
                }
            }
        }
        reload
    }
}

/// Move the cursor after a live-tail reload.
///
/// Descending sorts keep the user pinned to the top (newest first); every
/// other order pins to the bottom. Movement goes one row at a time through
/// the ordinary transitions so the viewport scrolls exactly as it would
/// for interactive navigation.
pub fn reconcile(cursor: &mut Cursor, len: usize, descending: bool) {
    cursor.clamp(len);
    if descending {
        while cursor.row > 0 {
            cursor.move_up();
        }
    } else {
        let last = len.saturating_sub(1);
        while cursor.row < last {
            cursor.move_down(len);
        }
    }
}
