//! Config error types for jlv.
//!
//! Provides rich error messages with file locations and typo suggestions.

use std::fmt;
use std::path::PathBuf;
use strsim::jaro_winkler;

/// Every field name the config format accepts.
const CONFIG_FIELDS: &[&str] = &["columns", "title", "key", "format"];
const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Error loading or parsing a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading the config file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parse error.
    Parse {
        path: PathBuf,
        message: String,
        line: Option<usize>,
        column: Option<usize>,
        suggestion: Option<String>,
    },

    /// Validation error (semantic errors after parsing).
    Validation { path: PathBuf, message: String },
}

impl ConfigError {
    /// Build a parse error from serde_json, suggesting a fix for unknown fields.
    pub fn from_json_error(path: PathBuf, err: serde_json::Error) -> Self {
        let message = err.to_string();
        let suggestion = unknown_field(&message).and_then(suggest_field);
        let position = |n: usize| if n > 0 { Some(n) } else { None };

        ConfigError::Parse {
            path,
            line: position(err.line()),
            column: position(err.column()),
            message: strip_position(&message).to_string(),
            suggestion,
        }
    }

    /// Format error in Cargo-style format.
    pub fn format_cargo_style(&self) -> String {
        match self {
            ConfigError::Io { path, source } => {
                format!(
                    "error: cannot read config file\n  --> {}\n  |\n  = {}\n",
                    path.display(),
                    source
                )
            }
            ConfigError::Parse {
                path,
                message,
                line,
                column,
                suggestion,
            } => {
                let location = match (line, column) {
                    (Some(l), Some(c)) => format!("{}:{}:{}", path.display(), l, c),
                    (Some(l), None) => format!("{}:{}", path.display(), l),
                    _ => format!("{}", path.display()),
                };
                let mut output = format!("error: {}\n  --> {}\n  |\n", message, location);
                if let Some(suggestion) = suggestion {
                    output.push_str(&format!("  = help: did you mean `{}`?\n", suggestion));
                }
                output
            }
            ConfigError::Validation { path, message } => {
                format!("error: {}\n  --> {}\n  |\n", message, path.display())
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_cargo_style())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Extract `name` from serde's "unknown field `name`, expected ..." message.
fn unknown_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("unknown field `")?;
    rest.split('`').next()
}

fn suggest_field(name: &str) -> Option<String> {
    CONFIG_FIELDS
        .iter()
        .filter(|&&known| jaro_winkler(name, known) >= SIMILARITY_THRESHOLD)
        .max_by(|a, b| {
            jaro_winkler(name, a)
                .partial_cmp(&jaro_winkler(name, b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|&s| s.to_string())
}

/// serde_json appends " at line L column C"; the location is reported separately.
fn strip_position(message: &str) -> &str {
    match message.rfind(" at line ") {
        Some(idx) => &message[..idx],
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(json: &str) -> ConfigError {
        let err = serde_json::from_str::<crate::config::types::RawConfig>(json).unwrap_err();
        ConfigError::from_json_error(PathBuf::from(".json-log-viewer.json"), err)
    }

    #[test]
    fn test_unknown_field_gets_suggestion() {
        let err = parse_error(r#"{"columns":[{"titel":"Level","key":"level"}]}"#);
        match err {
            ConfigError::Parse {
                suggestion, line, ..
            } => {
                assert_eq!(suggestion.as_deref(), Some("title"));
                assert_eq!(line, Some(1));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_has_no_suggestion() {
        let err = parse_error("{\n  \"columns\": [\n");
        match err {
            ConfigError::Parse {
                suggestion, line, ..
            } => {
                assert!(suggestion.is_none());
                assert!(line.is_some());
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_cargo_style_format() {
        let err = ConfigError::Parse {
            path: PathBuf::from("cfg.json"),
            message: "unknown field `kye`".to_string(),
            line: Some(3),
            column: Some(7),
            suggestion: Some("key".to_string()),
        };
        let text = err.format_cargo_style();
        assert!(text.contains("--> cfg.json:3:7"));
        assert!(text.contains("did you mean `key`?"));
    }

    #[test]
    fn test_strip_position() {
        assert_eq!(
            strip_position("expected value at line 2 column 5"),
            "expected value"
        );
        assert_eq!(strip_position("plain"), "plain");
    }
}
