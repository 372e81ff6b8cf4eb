//! Config discovery for jlv.
//!
//! Looks for `.json-log-viewer.json` in the working directory, then in the
//! home directory.

use std::path::{Path, PathBuf};

/// Config filename searched for in the working and home directories.
pub const CONFIG_FILE_NAME: &str = ".json-log-viewer.json";

/// Find the config file to use, if any.
pub fn discover() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let home = dirs::home_dir();
    let found = discover_in(cwd.as_deref(), home.as_deref());
    match &found {
        Some(path) => tracing::debug!(path = %path.display(), "found config file"),
        None => tracing::debug!("no config file, using default columns"),
    }
    found
}

/// Discovery against explicit directories: first existing file wins.
pub fn discover_in(cwd: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    [cwd, home]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.try_exists().unwrap_or(false) && candidate.is_file())
}
