//! A viewing session over one log file.
//!
//! Binds the view engine, cursor, search state and live tail together and
//! exposes every command as a synchronous method. Each command leaves the
//! cursor inside the current view.

use crate::config::Config;
use crate::filter::FilterMethod;
use crate::navigation::{Cursor, RenderHint};
use crate::search::{SearchEngine, SearchOutcome};
use crate::sort::SortSpec;
use crate::store::{LoadError, RecordStore};
use crate::tail::{self, LiveTail};
use crate::view::{DerivedView, ViewEngine, ViewState};
use std::path::Path;
use std::time::Instant;

/// Initial state for a new session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub level: Option<String>,
    pub sort: Option<SortSpec>,
    pub watch: bool,
    pub page_height: usize,
}

pub struct Session {
    engine: ViewEngine,
    cursor: Cursor,
    search: SearchEngine,
    tail: LiveTail,
}

impl Session {
    /// Load `path` and build a session. Fails only if the file can't be read.
    pub fn open<P: AsRef<Path>>(
        path: P,
        config: &Config,
        options: SessionOptions,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let store = RecordStore::load(path, config.known_fields())?;
        let tail = LiveTail::new(path, options.watch);
        Ok(Self::from_store(store, tail, options))
    }

    pub fn from_store(store: RecordStore, tail: LiveTail, options: SessionOptions) -> Self {
        let mut state = ViewState {
            sort: options.sort,
            ..ViewState::default()
        };
        if let Some(level) = options.level {
            state.filters = crate::filter::FilterSet::level(level);
        }

        Self {
            engine: ViewEngine::with_state(store, state),
            cursor: Cursor::new(options.page_height),
            search: SearchEngine::new(),
            tail,
        }
    }

    pub fn engine(&self) -> &ViewEngine {
        &self.engine
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn path(&self) -> &Path {
        self.engine.store().path()
    }

    pub fn view(&mut self) -> DerivedView<'_> {
        self.engine.view()
    }

    pub fn len(&mut self) -> usize {
        self.engine.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.engine.is_empty()
    }

    /// Rows currently inside the viewport, plus the cursor's offset in them.
    pub fn visible(&mut self) -> (DerivedView<'_>, usize, usize) {
        let top = self.cursor.viewport_top;
        let relative = self.cursor.relative_row();
        (self.engine.view(), top, relative)
    }

    // --- filters and sort ---

    pub fn set_filter(&mut self, field: &str, value: &str, method: FilterMethod) {
        self.engine.set_filter(field, value, method);
        self.cursor.reset();
    }

    pub fn set_level_filter(&mut self, level: &str) {
        self.engine.set_level_filter(level);
        self.cursor.reset();
    }

    pub fn clear_filters(&mut self) {
        self.engine.clear_filters();
        self.cursor.reset();
    }

    pub fn has_filters(&self) -> bool {
        !self.engine.filters().is_empty()
    }

    /// Change the sort; the cursor keeps its position unless now out of range.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.engine.set_sort(sort);
        let len = self.engine.len();
        self.cursor.clamp(len);
    }

    /// Flip the direction of the active sort.
    pub fn invert_sort(&mut self) {
        if let Some(sort) = self.engine.sort().map(SortSpec::inverted) {
            self.set_sort(Some(sort));
        }
    }

    /// Sort by `key`; picking the key that is already sorted ascending
    /// switches it to descending.
    pub fn choose_sort(&mut self, key: &str) {
        let spec = match self.engine.sort() {
            Some(current) if current.key == key && !current.descending => {
                SortSpec::descending(key)
            }
            _ => SortSpec::ascending(key),
        };
        self.set_sort(Some(spec));
    }

    // --- navigation ---

    pub fn move_down(&mut self) -> RenderHint {
        let len = self.engine.len();
        self.cursor.move_down(len)
    }

    pub fn move_up(&mut self) -> RenderHint {
        self.cursor.move_up()
    }

    pub fn page_down(&mut self) -> RenderHint {
        let len = self.engine.len();
        self.cursor.page_down(len)
    }

    pub fn page_up(&mut self) -> RenderHint {
        self.cursor.page_up()
    }

    pub fn first_page(&mut self) -> RenderHint {
        self.cursor.first_page()
    }

    pub fn last_page(&mut self) -> RenderHint {
        let len = self.engine.len();
        self.cursor.last_page(len)
    }

    pub fn goto(&mut self, row: usize) -> RenderHint {
        let len = self.engine.len();
        self.cursor.goto(row, len)
    }

    pub fn move_to_first_viewport_line(&mut self) -> RenderHint {
        let len = self.engine.len();
        self.cursor.move_to_first_viewport_line(len)
    }

    pub fn move_to_last_viewport_line(&mut self) -> RenderHint {
        let len = self.engine.len();
        self.cursor.move_to_last_viewport_line(len)
    }

    pub fn move_to_center_viewport_line(&mut self) -> RenderHint {
        let len = self.engine.len();
        self.cursor.move_to_center_viewport_line(len)
    }

    pub fn resize(&mut self, page_height: usize) -> RenderHint {
        self.cursor.resize(page_height)
    }

    // --- search ---

    pub fn last_search_term(&self) -> Option<&str> {
        self.search.last_term()
    }

    pub fn clear_search_term(&mut self) {
        self.search.clear();
    }

    /// Case-insensitive search starting below the cursor; jumps on a hit.
    pub fn search(&mut self, term: &str) -> SearchOutcome {
        let start = self.cursor.row + 1;
        let outcome = self.search.search(&self.engine.view(), term, false, start);
        self.jump_to_match(&outcome);
        outcome
    }

    pub fn repeat_search(&mut self) -> SearchOutcome {
        let row = self.cursor.row;
        let outcome = self.search.repeat(&self.engine.view(), row);
        self.jump_to_match(&outcome);
        outcome
    }

    fn jump_to_match(&mut self, outcome: &SearchOutcome) {
        if let SearchOutcome::Found(row) = outcome {
            self.goto(*row);
        }
    }

    // --- reload and live tail ---

    /// Manual reload: new contents, cursor only clamped.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        self.engine.reload()?;
        let len = self.engine.len();
        self.cursor.clamp(len);
        Ok(())
    }

    /// Live-tail reload: new contents, cursor pinned to where new rows appear.
    pub fn tail_reload(&mut self) -> Result<(), LoadError> {
        self.engine.reload()?;
        let len = self.engine.len();
        let descending = self.engine.sort().is_some_and(|s| s.descending);
        tail::reconcile(&mut self.cursor, len, descending);
        Ok(())
    }

    pub fn is_watching(&self) -> bool {
        self.tail.is_enabled()
    }

    pub fn toggle_watch(&mut self) -> bool {
        self.tail.toggle()
    }

    /// Drain file notifications; reload and reconcile when one gets through.
    ///
    /// A failed reload leaves the old contents in place and is retried on
    /// the next notification. Returns true when the contents changed.
    pub fn poll_live_tail(&mut self, now: Instant) -> bool {
        if !self.tail.poll(now) {
            return false;
        }
        match self.tail_reload() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "live-tail reload failed, waiting for next change");
                self.tail.reload_failed();
                false
            }
        }
    }
}
