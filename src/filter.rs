//! Field filters applied when computing the derived view.

use crate::record::{is_truthy, value_text, KnownFields, Record};
use std::fmt;

/// Field carrying the log level, used by the level filter shortcut.
pub const LEVEL_FIELD: &str = "level";

/// How a clause compares the field value against its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMethod {
    /// Case-sensitive equality of the value's text form.
    #[default]
    Exact,
    /// Case-insensitive substring match of the value's text form.
    Contains,
}

/// A single `field <method> value` test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub value: String,
    pub method: FilterMethod,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, value: impl Into<String>, method: FilterMethod) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            method,
        }
    }

    pub fn level(level: impl Into<String>) -> Self {
        Self::new(LEVEL_FIELD, level, FilterMethod::Exact)
    }

    /// A missing or falsy field value never matches.
    pub fn matches(&self, record: &Record, known: &KnownFields) -> bool {
        let path = known.resolve(&self.field);
        let Some(value) = record.lookup(&path) else {
            return false;
        };
        if !is_truthy(value) {
            return false;
        }

        let text = value_text(value);
        match self.method {
            FilterMethod::Exact => text == self.value,
            FilterMethod::Contains => text.to_lowercase().contains(&self.value.to_lowercase()),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            FilterMethod::Exact => write!(f, "{}={}", self.field, self.value),
            FilterMethod::Contains => write!(f, "{}~{}", self.field, self.value),
        }
    }
}

/// Custom clauses plus the optional level filter, all ANDed together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
    level: Option<String>,
}

impl FilterSet {
    pub fn single(clause: FilterClause) -> Self {
        Self {
            clauses: vec![clause],
            level: None,
        }
    }

    pub fn level(level: impl Into<String>) -> Self {
        Self {
            clauses: Vec::new(),
            level: Some(level.into()),
        }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn level_filter(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.level.is_none()
    }

    /// Custom clauses followed by the level clause, if any.
    pub fn active_clauses(&self) -> Vec<FilterClause> {
        let mut clauses = self.clauses.clone();
        if let Some(level) = &self.level {
            clauses.push(FilterClause::level(level.clone()));
        }
        clauses
    }

    pub fn matches(&self, record: &Record, known: &KnownFields) -> bool {
        self.clauses.iter().all(|c| c.matches(record, known))
            && self
                .level
                .as_ref()
                .map_or(true, |level| FilterClause::level(level.clone()).matches(record, known))
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.active_clauses().iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(" & "))
    }
}
