//! Sort specification and the total ordering used to sort records.

use crate::record::{KnownFields, Record};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// Prefix that marks a descending sort in the textual form (`-timestamp`).
const DESCENDING_PREFIX: char = '-';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            descending: false,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            descending: true,
        }
    }

    /// Parse `key` (ascending) or `-key` (descending).
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        let (key, descending) = match spec.strip_prefix(DESCENDING_PREFIX) {
            Some(rest) => (rest, true),
            None => (spec, false),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            descending,
        })
    }

    /// Same key, opposite direction.
    pub fn inverted(&self) -> Self {
        Self {
            key: self.key.clone(),
            descending: !self.descending,
        }
    }

    /// Stable-sort `indices` (into `records`) by this spec.
    ///
    /// Records with equal keys keep their relative order in both directions.
    pub fn sort_indices(&self, indices: &mut Vec<usize>, records: &[Record], known: &KnownFields) {
        let path = known.resolve(&self.key);
        let mut keyed: Vec<(Option<&Value>, usize)> = indices
            .iter()
            .map(|&i| (records.get(i).and_then(|r| r.lookup(&path)), i))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            let ord = compare_values(*a, *b);
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });

        *indices = keyed.into_iter().map(|(_, i)| i).collect();
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "{}{}", DESCENDING_PREFIX, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None => 0,
        Some(Value::Null) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Number(_)) => 3,
        Some(Value::String(_)) => 4,
        Some(Value::Array(_)) => 5,
        Some(Value::Object(_)) => 6,
    }
}

/// Total order over optional JSON values.
///
/// Missing sorts lowest, then null, booleans, numbers, strings, arrays and
/// objects. Values of the same type compare naturally; arrays and objects
/// compare by their JSON text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ Value::Array(_)), Some(y @ Value::Array(_)))
        | (Some(x @ Value::Object(_)), Some(y @ Value::Object(_))) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
