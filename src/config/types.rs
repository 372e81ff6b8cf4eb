//! Config types for jlv.
//!
//! The config file lists the table columns; their keys double as the set of
//! known top-level record fields.

use crate::record::KnownFields;
use serde::Deserialize;
use std::path::PathBuf;

/// Raw config file structure (used for parsing).
///
/// Unknown fields are rejected with an error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Table columns, in display order. Defaults apply when absent.
    #[serde(default)]
    pub columns: Option<Vec<Column>>,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    /// Header text.
    pub title: String,
    /// Record field shown in this column.
    pub key: String,
    /// Optional one-character display format.
    #[serde(default)]
    pub format: Option<String>,
}

/// How a column renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// The whole value text.
    Full,
    /// Uppercased first character of the value (used for levels).
    LevelInitial,
    /// A one-cell marker: the given character when the value is present.
    Marker(char),
}

impl Column {
    pub fn new(title: &str, key: &str, format: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            key: key.to_string(),
            format: format.map(str::to_string),
        }
    }

    pub fn format_kind(&self) -> ColumnFormat {
        match self.format.as_deref() {
            None | Some("") => ColumnFormat::Full,
            Some("L") => ColumnFormat::LevelInitial,
            Some(other) => ColumnFormat::Marker(other.chars().next().unwrap_or(' ')),
        }
    }
}

/// Resolved configuration, passed explicitly to the session and renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Table columns, in display order.
    pub columns: Vec<Column>,
    /// File the columns were loaded from (None for built-in defaults).
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new("Timestamp", "timestamp", None),
            Column::new("Level", "level", Some("L")),
            Column::new("Process", "process", None),
            Column::new("Method", "method", Some(" ")),
            Column::new("Id", "processId", None),
            Column::new("Activity", "activity", Some(" ")),
            Column::new("event", "event", Some(" ")),
            Column::new("Message", "message", None),
        ]
    }

    /// Column keys, treated as the known top-level record fields.
    pub fn known_fields(&self) -> KnownFields {
        KnownFields::new(self.columns.iter().map(|c| c.key.clone()))
    }

    /// Column keys in display order, offered by the sort picker.
    pub fn field_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: Self::default_columns(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_known_fields() {
        let known = Config::default().known_fields();
        for name in [
            "timestamp",
            "level",
            "process",
            "method",
            "processId",
            "activity",
            "event",
            "message",
        ] {
            assert!(known.contains(name), "missing {}", name);
        }
        assert!(!known.contains("data"));
    }

    #[test]
    fn test_format_kind() {
        assert_eq!(Column::new("T", "t", None).format_kind(), ColumnFormat::Full);
        assert_eq!(
            Column::new("L", "level", Some("L")).format_kind(),
            ColumnFormat::LevelInitial
        );
        assert_eq!(
            Column::new("D", "data", Some("*")).format_kind(),
            ColumnFormat::Marker('*')
        );
    }
}
