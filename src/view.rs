//! View engine: the filtered and sorted projection of a record store.
//!
//! The derived view is a list of indices into the store, memoized on the
//! pair (store version, view state). Any change to either makes the next
//! [`ViewEngine::view`] call recompute it.

use crate::filter::{FilterClause, FilterMethod, FilterSet};
use crate::memo::Memoized;
use crate::record::Record;
use crate::sort::SortSpec;
use crate::store::{LoadError, RecordStore};

/// Everything that shapes the derived view besides the records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub filters: FilterSet,
    pub sort: Option<SortSpec>,
}

type ViewKey = (u64, ViewState);

pub struct ViewEngine {
    store: RecordStore,
    state: ViewState,
    derived: Memoized<ViewKey, Vec<usize>>,
}

impl ViewEngine {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            state: ViewState::default(),
            derived: Memoized::new(),
        }
    }

    pub fn with_state(store: RecordStore, state: ViewState) -> Self {
        Self {
            store,
            state,
            derived: Memoized::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.state.sort.as_ref()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.state.filters
    }

    /// Replace all filters with a single custom clause.
    pub fn set_filter(&mut self, field: &str, value: &str, method: FilterMethod) {
        self.set_filters(FilterSet::single(FilterClause::new(field, value, method)));
    }

    /// Replace all filters with an exact match on the level field.
    pub fn set_level_filter(&mut self, level: &str) {
        self.set_filters(FilterSet::level(level));
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterSet::default());
    }

    fn set_filters(&mut self, filters: FilterSet) {
        tracing::debug!(filters = %filters, "filters changed");
        self.state.filters = filters;
        self.derived.invalidate();
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        tracing::debug!(sort = ?sort.as_ref().map(|s| s.to_string()), "sort changed");
        self.state.sort = sort;
        self.derived.invalidate();
    }

    /// Reload the underlying store; the view goes stale only on success.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        self.store.reload()?;
        self.derived.invalidate();
        Ok(())
    }

    /// Derived view, recomputed if stale.
    pub fn view(&mut self) -> DerivedView<'_> {
        let key = (self.store.version(), self.state.clone());
        let store = &self.store;
        let state = &self.state;
        let indices = self.derived.get_or_compute(key, || compute(store, state));
        DerivedView {
            store,
            indices: indices.as_slice(),
        }
    }

    /// Number of rows in the derived view.
    pub fn len(&mut self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn is_stale(&self) -> bool {
        !self
            .derived
            .is_fresh(&(self.store.version(), self.state.clone()))
    }
}

fn compute(store: &RecordStore, state: &ViewState) -> Vec<usize> {
    let known = store.known_fields();
    let records = store.records();

    let mut indices: Vec<usize> = if state.filters.is_empty() {
        (0..records.len()).collect()
    } else {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| state.filters.matches(r, known))
            .map(|(i, _)| i)
            .collect()
    };

    if let Some(sort) = &state.sort {
        sort.sort_indices(&mut indices, records, known);
    }

    tracing::debug!(
        total = records.len(),
        visible = indices.len(),
        "recomputed derived view"
    );
    indices
}

/// Borrowed projection of the store: rows of the current view, in order.
#[derive(Clone, Copy)]
pub struct DerivedView<'a> {
    store: &'a RecordStore,
    indices: &'a [usize],
}

impl<'a> DerivedView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Store indices of each row.
    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    pub fn get(&self, row: usize) -> Option<&'a Record> {
        self.indices.get(row).and_then(|&i| self.store.get(i))
    }

    /// Rows `start..start + count`, clipped to the view.
    pub fn slice(&self, start: usize, count: usize) -> Vec<&'a Record> {
        let start = start.min(self.indices.len());
        let end = start.saturating_add(count).min(self.indices.len());
        self.indices[start..end]
            .iter()
            .filter_map(|&i| self.store.get(i))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + 'a {
        let store = self.store;
        self.indices.iter().filter_map(move |&i| store.get(i))
    }
}
