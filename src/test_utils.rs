use crate::app::App;
use crate::config::Config;
use crate::session::{Session, SessionOptions};
use crate::store::RecordStore;
use crate::tail::LiveTail;
use std::path::PathBuf;

/// `n` log lines with increasing timestamps; every third one is an error.
pub fn numbered_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let level = if i % 3 == 0 { "error" } else { "info" };
            format!(
                r#"{{"timestamp":{},"level":"{}","message":"m{}"}}"#,
                i, level, i
            )
        })
        .collect()
}

/// App over `n` in-memory records with a page height of 10 and default columns.
/// The backing path does not exist, so reloads fail.
pub fn test_app(n: usize) -> App {
    let config = Config::default();
    let path = PathBuf::from("/nonexistent/test.log");
    let store = RecordStore::from_lines(path.clone(), config.known_fields(), numbered_lines(n));
    let tail = LiveTail::new(&path, false);
    let options = SessionOptions {
        page_height: 10,
        ..SessionOptions::default()
    };
    App::new(Session::from_store(store, tail, options), config)
}
