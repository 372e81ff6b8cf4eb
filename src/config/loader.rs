//! Config loading for jlv.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::types::{Config, RawConfig};

/// Load and validate one config file.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = serde_json::from_str(&content)
        .map_err(|e| ConfigError::from_json_error(path.to_path_buf(), e))?;

    let columns = match raw.columns {
        None => Config::default_columns(),
        Some(columns) => {
            if columns.is_empty() {
                return Err(ConfigError::Validation {
                    path: path.to_path_buf(),
                    message: "`columns` must list at least one column".to_string(),
                });
            }
            if let Some(idx) = columns.iter().position(|c| c.key.trim().is_empty()) {
                return Err(ConfigError::Validation {
                    path: path.to_path_buf(),
                    message: format!("column {} has an empty `key`", idx + 1),
                });
            }
            columns
        }
    };

    tracing::info!(path = %path.display(), columns = columns.len(), "loaded config");
    Ok(Config {
        columns,
        source: Some(path.to_path_buf()),
    })
}

/// Load the given config file, or fall back to the built-in columns.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_file(path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Column;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".json-log-viewer.json");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = load(None).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_load_custom_columns() {
        let (_dir, path) = write_config(
            r#"{"columns":[{"title":"Time","key":"ts"},{"title":"L","key":"lvl","format":"L"}]}"#,
        );
        let config = load(Some(path.as_path())).unwrap();
        assert_eq!(
            config.columns,
            vec![
                Column::new("Time", "ts", None),
                Column::new("L", "lvl", Some("L"))
            ]
        );
        assert!(config.known_fields().contains("lvl"));
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn test_missing_columns_key_uses_defaults() {
        let (_dir, path) = write_config("{}");
        let config = load_file(&path).unwrap();
        assert_eq!(config.columns, Config::default_columns());
    }

    #[test]
    fn test_empty_columns_rejected() {
        let (_dir, path) = write_config(r#"{"columns":[]}"#);
        assert!(matches!(
            load_file(&path),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_blank_key_rejected() {
        let (_dir, path) = write_config(r#"{"columns":[{"title":"X","key":" "}]}"#);
        assert!(matches!(
            load_file(&path),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let (_dir, path) = write_config(r#"{"colums":[]}"#);
        match load_file(&path) {
            Err(ConfigError::Parse { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("columns"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_file(Path::new("/nonexistent/.json-log-viewer.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
