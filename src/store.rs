//! Record store: the full, ordered set of records parsed from one file.

use crate::record::{KnownFields, Record};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Error loading a log file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read log file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
        }
    }
}

/// All records of one source file, index order = file line order.
///
/// Contents only change through [`RecordStore::reload`], which swaps the
/// whole sequence and bumps [`RecordStore::version`].
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    known: KnownFields,
    records: Vec<Record>,
    raw_line_count: usize,
    version: u64,
}

impl RecordStore {
    /// Read and parse the whole file.
    pub fn load<P: AsRef<Path>>(path: P, known: KnownFields) -> Result<Self, LoadError> {
        let path = path.as_ref().to_path_buf();
        let records = read_records(&path, &known)?;
        tracing::info!(path = %path.display(), records = records.len(), "loaded log file");

        Ok(Self {
            raw_line_count: records.len(),
            path,
            known,
            records,
            version: 0,
        })
    }

    /// Build a store from in-memory lines, without a backing file.
    pub fn from_lines<I, S>(path: PathBuf, known: KnownFields, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records = parse_lines(lines, &known);
        Self {
            raw_line_count: records.len(),
            path,
            known,
            records,
            version: 0,
        }
    }

    /// Re-read the same path and replace every record at once.
    ///
    /// On failure the previous contents stay in place.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let records = read_records(&self.path, &self.known)?;
        tracing::debug!(
            path = %self.path.display(),
            before = self.records.len(),
            after = records.len(),
            "reloaded log file"
        );
        self.raw_line_count = records.len();
        self.records = records;
        self.version += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn known_fields(&self) -> &KnownFields {
        &self.known
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of non-blank lines read from the file.
    pub fn raw_line_count(&self) -> usize {
        self.raw_line_count
    }

    /// Incremented on every successful reload.
    pub fn version(&self) -> u64 {
        self.version
    }
}

fn read_records(path: &Path, known: &KnownFields) -> Result<Vec<Record>, LoadError> {
    let content = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&content);
    Ok(parse_lines(text.lines(), known))
}

fn parse_lines<I, S>(lines: I, known: &KnownFields) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .map(|line| Record::parse(line.as_ref(), known))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn known() -> KnownFields {
        KnownFields::new(["timestamp", "level", "message"])
    }

    #[test]
    fn test_load_parses_each_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"level":"info","message":"one"}}"#).unwrap();
        writeln!(file, r#"{{"level":"error","message":"two"}}"#).unwrap();
        file.flush().unwrap();

        let store = RecordStore::load(file.path(), known()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.raw_line_count(), 2);
        assert_eq!(store.get(1).unwrap().get("message"), Some(&json!("two")));
    }

    #[test]
    fn test_load_skips_blank_lines_and_keeps_bad_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"level\":\"info\"}}\n\n   \nnot json\r\n").unwrap();
        file.flush().unwrap();

        let store = RecordStore::load(file.path(), known()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().get("message"), Some(&json!("not json")));
    }

    #[test]
    fn test_load_last_line_without_newline() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"level\":\"a\"}}\n{{\"level\":\"b\"}}").unwrap();
        file.flush().unwrap();

        let store = RecordStore::load(file.path(), known()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = RecordStore::load("/path/that/does/not/exist.log", known());
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_reload_replaces_records_and_bumps_version() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"level":"info"}}"#).unwrap();
        file.flush().unwrap();

        let mut store = RecordStore::load(file.path(), known()).unwrap();
        assert_eq!(store.version(), 0);

        writeln!(file, r#"{{"level":"warn"}}"#).unwrap();
        file.flush().unwrap();
        store.reload().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_reload_failure_keeps_previous_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "{\"level\":\"info\"}\n").unwrap();

        let mut store = RecordStore::load(&path, known()).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(store.reload().is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.version(), 0);
    }
}
