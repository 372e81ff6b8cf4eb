//! Parsed log records.
//!
//! Each input line becomes one [`Record`]: an ordered JSON object whose
//! top-level keys are either known column fields or live under the
//! [`DATA_FIELD`] bucket. Lookups go through [`Record::lookup`], which walks
//! a dotted path segment by segment.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Bucket holding every top-level key that is not a known field.
pub const DATA_FIELD: &str = "data";

/// Field that receives the raw text of a line that is not a JSON object.
pub const RAW_TEXT_FIELD: &str = "message";

/// The set of top-level field names treated as primary columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownFields {
    names: Vec<String>,
}

impl KnownFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Map a user-facing field name to the lookup path inside a record.
    ///
    /// Known fields (and paths that already address the data bucket) are used
    /// as-is; anything else is looked up as `data.<field>`.
    pub fn resolve<'a>(&self, field: &'a str) -> Cow<'a, str> {
        let head = field.split('.').next().unwrap_or(field);
        if self.contains(head) || head == DATA_FIELD {
            Cow::Borrowed(field)
        } else {
            Cow::Owned(format!("{}.{}", DATA_FIELD, field))
        }
    }
}

/// One parsed log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Fallback record for a line that is not a JSON object. The text is
    /// bucketed like any other field, so it lands under `data` when
    /// `message` is not a known field.
    pub fn raw(line: &str, known: &KnownFields) -> Self {
        let text = Value::String(line.to_string());
        let mut fields = Map::new();
        if known.contains(RAW_TEXT_FIELD) {
            fields.insert(RAW_TEXT_FIELD.to_string(), text);
        } else {
            let mut bucket = Map::new();
            bucket.insert(RAW_TEXT_FIELD.to_string(), text);
            fields.insert(DATA_FIELD.to_string(), Value::Object(bucket));
        }
        Self { fields }
    }

    /// Parse one line, moving unknown top-level keys into the data bucket.
    ///
    /// Never fails: anything that is not a JSON object degrades to
    /// [`Record::raw`].
    pub fn parse(line: &str, known: &KnownFields) -> Self {
        let object = match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(object)) => object,
            _ => return Self::raw(line, known),
        };

        let mut fields = Map::new();
        let mut bucket = Map::new();

        for (key, value) in object {
            if known.contains(&key) {
                fields.insert(key, value);
            } else if key == DATA_FIELD {
                match value {
                    Value::Object(inner) => bucket.extend(inner),
                    other => {
                        bucket.insert(key, other);
                    }
                }
            } else {
                bucket.insert(key, value);
            }
        }

        if !bucket.is_empty() {
            match fields.get_mut(DATA_FIELD) {
                Some(Value::Object(existing)) => {
                    for (key, value) in bucket {
                        existing.entry(key).or_insert(value);
                    }
                }
                Some(_) => fields.extend(bucket),
                None => {
                    fields.insert(DATA_FIELD.to_string(), Value::Object(bucket));
                }
            }
        }

        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Walk a dotted path (`data.request.id`, `tags.0`) through the record.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next().filter(|s| !s.is_empty())?;
        let mut current = self.fields.get(first)?;

        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Canonical single-line text form, used by search.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_default()
    }

    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.fields).unwrap_or_default()
    }
}

/// Whether a value counts as present for filtering.
///
/// Null, `false`, zero and the empty string are treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a value: strings unquoted, everything else as JSON.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
