//! Forward text search over the derived view.

use crate::view::DerivedView;

/// Result of a search command. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Row index of the first match.
    Found(usize),
    /// The scan reached the end of the view without a hit.
    NoMatches(String),
    /// `repeat` was requested before any search.
    NoPreviousSearch,
}

/// Remembers the last search term between commands.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    last_term: Option<String>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_term(&self) -> Option<&str> {
        self.last_term.as_deref()
    }

    pub fn clear(&mut self) {
        self.last_term = None;
    }

    /// Search for `term` from `start_row` (inclusive) and remember it.
    ///
    /// An empty term behaves like a repeat with nothing remembered.
    pub fn search(
        &mut self,
        view: &DerivedView<'_>,
        term: &str,
        case_sensitive: bool,
        start_row: usize,
    ) -> SearchOutcome {
        if term.is_empty() {
            return SearchOutcome::NoPreviousSearch;
        }
        self.last_term = Some(term.to_string());
        match find(view, term, case_sensitive, start_row) {
            Some(row) => SearchOutcome::Found(row),
            None => SearchOutcome::NoMatches(term.to_string()),
        }
    }

    /// Search again for the remembered term, starting after `cursor_row`.
    pub fn repeat(&mut self, view: &DerivedView<'_>, cursor_row: usize) -> SearchOutcome {
        match self.last_term.clone() {
            Some(term) => self.search(view, &term, false, cursor_row + 1),
            None => SearchOutcome::NoPreviousSearch,
        }
    }
}

/// First row at or after `start_row` whose JSON text contains `term`.
pub fn find(
    view: &DerivedView<'_>,
    term: &str,
    case_sensitive: bool,
    start_row: usize,
) -> Option<usize> {
    let needle = if case_sensitive {
        term.to_string()
    } else {
        term.to_lowercase()
    };

    view.iter()
        .enumerate()
        .skip(start_row)
        .find(|(_, record)| {
            let text = record.to_json_string();
            if case_sensitive {
                text.contains(&needle)
            } else {
                text.to_lowercase().contains(&needle)
            }
        })
        .map(|(row, _)| row)
}
